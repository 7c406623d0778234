//! リクエスト組み立て (状態機械)

use std::collections::HashMap;

use crate::config::ParserConfig;
use crate::error::Error;
use crate::request::{Method, Request};

use super::header_line::decode_header_line;
use super::phase::RequestState;
use super::request_line::decode_request_line;

/// ボディの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// ボディなし
    None,
    /// Content-Length ヘッダーがあったがボディは読んでいない
    ///
    /// `declared` は Content-Length の値 (数値として解釈できない場合は `None`)。
    /// ボディのバイト列はストリームに残っている。
    Ignored { declared: Option<usize> },
}

impl Payload {
    /// ストリームから読み捨てるバイト数
    ///
    /// ボディがない場合や読み捨てない設定の場合は `None` を返す。
    pub fn drain_len(&self, config: &ParserConfig) -> Option<usize> {
        let Payload::Ignored { declared } = *self else {
            return None;
        };
        let len = config.drain_len(declared);
        if len.is_none() {
            tracing::debug!(?declared, "request payload left unread");
        }
        len
    }
}

/// 1 行を渡した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// 次の行が必要
    NeedLine,
    /// リクエスト行の前にストリームが終わった
    Closed,
    /// リクエスト完了
    Complete { request: Request, payload: Payload },
}

/// リクエスト組み立て器 (Sans I/O)
///
/// `push_line()` に 1 行ずつ渡す。EOF は `None` で表す。
/// `RequestLine → HeaderLine → BodyLine → End` の順に遷移する。
#[derive(Debug)]
pub struct RequestAssembler {
    state: RequestState,
    request_line: Option<(Method, Vec<u8>, Vec<u8>)>,
    headers: HashMap<String, Vec<u8>>,
    header_lines: usize,
    max_headers: usize,
    /// Content-Length の生の値
    content_length: Option<Vec<u8>>,
    finished: bool,
}

impl Default for RequestAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestAssembler {
    /// デフォルト設定で作成
    pub fn new() -> Self {
        Self::with_config(&ParserConfig::default())
    }

    /// 設定付きで作成
    pub fn with_config(config: &ParserConfig) -> Self {
        Self {
            state: RequestState::RequestLine,
            request_line: None,
            headers: HashMap::new(),
            header_lines: 0,
            max_headers: config.max_headers,
            content_length: None,
            finished: false,
        }
    }

    /// 現在の状態
    pub fn state(&self) -> RequestState {
        self.state
    }

    /// リクエスト完了またはエラーで停止したかどうか
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 1 行を渡して状態を進める
    ///
    /// エラーの場合は途中までのリクエストを返さずに停止する。
    /// 停止後に呼ぶと `Error::Finished` を返す。
    pub fn push_line(&mut self, line: Option<Vec<u8>>) -> Result<Progress, Error> {
        if self.finished {
            return Err(Error::Finished);
        }
        let result = self.step(line);
        if !matches!(result, Ok(Progress::NeedLine)) {
            self.finished = true;
        }
        result
    }

    fn step(&mut self, line: Option<Vec<u8>>) -> Result<Progress, Error> {
        match self.state {
            RequestState::RequestLine => {
                let Some(line) = line else {
                    return Ok(Progress::Closed);
                };
                self.request_line = Some(decode_request_line(&line)?);
                self.state = RequestState::HeaderLine;
                Ok(Progress::NeedLine)
            }
            RequestState::HeaderLine => {
                let Some(line) = line else {
                    // 空行の前に EOF: ここまでをヘッダーとして扱う
                    tracing::debug!("stream ended before end of headers");
                    self.state = RequestState::BodyLine;
                    return self.complete();
                };
                if line.is_empty() {
                    self.state = RequestState::BodyLine;
                    return self.complete();
                }

                self.header_lines += 1;
                if self.header_lines > self.max_headers {
                    return Err(Error::TooManyHeaders {
                        count: self.header_lines,
                        limit: self.max_headers,
                    });
                }

                let (name, value) = decode_header_line(&line)?;
                if name == "Content-Length" {
                    self.content_length = Some(value.clone());
                }
                // TODO: 同名ヘッダーを値のリストとしてまとめる
                self.headers.insert(name, value);
                Ok(Progress::NeedLine)
            }
            RequestState::BodyLine | RequestState::End => Err(Error::Finished),
        }
    }

    fn complete(&mut self) -> Result<Progress, Error> {
        let (method, target, version) = self.request_line.take().ok_or(Error::Finished)?;

        let payload = match self.content_length.take() {
            // ボディなし: BodyLine のまま停止
            None => Payload::None,
            Some(value) => {
                tracing::debug!("ignoring request payload");
                self.state = RequestState::End;
                Payload::Ignored {
                    declared: parse_content_length(&value),
                }
            }
        };

        let request = Request::new(method, target, version, std::mem::take(&mut self.headers));
        Ok(Progress::Complete { request, payload })
    }
}

fn parse_content_length(value: &[u8]) -> Option<usize> {
    std::str::from_utf8(value.trim_ascii()).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_all(assembler: &mut RequestAssembler, lines: &[&[u8]]) -> Result<Progress, Error> {
        let mut progress = Progress::NeedLine;
        for line in lines {
            progress = assembler.push_line(Some(line.to_vec()))?;
        }
        Ok(progress)
    }

    #[test]
    fn request_without_body_halts_at_body_line() {
        let mut assembler = RequestAssembler::new();
        let progress = push_all(&mut assembler, &[b"GET / HTTP/1.1", b"Host: x", b""]).unwrap();
        let Progress::Complete { request, payload } = progress else {
            panic!("unexpected progress: {progress:?}");
        };
        assert_eq!(payload, Payload::None);
        assert_eq!(assembler.state(), RequestState::BodyLine);
        assert_eq!(request.method(), &Method::Get);
        assert_eq!(request.target(), b"/");
        assert_eq!(request.version(), b"1.1");
        assert_eq!(request.header("Host"), Some(&b" x"[..]));
        assert!(request.body().is_empty());
    }

    #[test]
    fn content_length_moves_to_end() {
        let mut assembler = RequestAssembler::new();
        let progress = push_all(
            &mut assembler,
            &[b"POST /upload HTTP/1.1", b"Content-Length: 5", b""],
        )
        .unwrap();
        let Progress::Complete { request, payload } = progress else {
            panic!("unexpected progress: {progress:?}");
        };
        assert_eq!(payload, Payload::Ignored { declared: Some(5) });
        assert_eq!(assembler.state(), RequestState::End);
        assert!(request.body().is_empty());
    }

    #[test]
    fn content_length_name_is_case_sensitive() {
        let mut assembler = RequestAssembler::new();
        let progress = push_all(
            &mut assembler,
            &[b"POST / HTTP/1.1", b"content-length: 5", b""],
        )
        .unwrap();
        assert!(matches!(
            progress,
            Progress::Complete {
                payload: Payload::None,
                ..
            }
        ));
    }

    #[test]
    fn unparsable_content_length() {
        let mut assembler = RequestAssembler::new();
        let progress =
            push_all(&mut assembler, &[b"POST / HTTP/1.1", b"Content-Length: abc", b""]).unwrap();
        assert!(matches!(
            progress,
            Progress::Complete {
                payload: Payload::Ignored { declared: None },
                ..
            }
        ));
    }

    #[test]
    fn last_header_wins() {
        let mut assembler = RequestAssembler::new();
        let progress =
            push_all(&mut assembler, &[b"GET / HTTP/1.1", b"X-A: 1", b"X-A: 2", b""]).unwrap();
        let Progress::Complete { request, .. } = progress else {
            panic!("unexpected progress: {progress:?}");
        };
        assert_eq!(request.header("X-A"), Some(&b" 2"[..]));
        assert_eq!(request.headers().len(), 1);
    }

    #[test]
    fn eof_before_request_line() {
        let mut assembler = RequestAssembler::new();
        assert_eq!(assembler.push_line(None).unwrap(), Progress::Closed);
        assert!(assembler.is_finished());
    }

    #[test]
    fn eof_in_headers_completes() {
        let mut assembler = RequestAssembler::new();
        push_all(&mut assembler, &[b"GET / HTTP/1.1", b"Host: x"]).unwrap();
        let progress = assembler.push_line(None).unwrap();
        assert!(matches!(progress, Progress::Complete { .. }));
        assert_eq!(assembler.state(), RequestState::BodyLine);
    }

    #[test]
    fn request_line_error_aborts() {
        let mut assembler = RequestAssembler::new();
        assert!(matches!(
            assembler.push_line(Some(b"GET /".to_vec())),
            Err(Error::RequestLine { fields: 2 })
        ));
        assert!(assembler.is_finished());
        assert!(matches!(
            assembler.push_line(Some(b"Host: x".to_vec())),
            Err(Error::Finished)
        ));
    }

    #[test]
    fn header_error_aborts() {
        let mut assembler = RequestAssembler::new();
        assert!(matches!(
            push_all(&mut assembler, &[b"GET / HTTP/1.1", b"Malformed"]),
            Err(Error::Header { .. })
        ));
        assert!(assembler.is_finished());
    }

    #[test]
    fn push_after_complete() {
        let mut assembler = RequestAssembler::new();
        push_all(&mut assembler, &[b"GET / HTTP/1.1", b""]).unwrap();
        assert!(matches!(
            assembler.push_line(Some(b"GET / HTTP/1.1".to_vec())),
            Err(Error::Finished)
        ));
    }

    #[test]
    fn too_many_headers() {
        let config = ParserConfig::default().max_headers(2);
        let mut assembler = RequestAssembler::with_config(&config);
        assert!(matches!(
            push_all(&mut assembler, &[b"GET / HTTP/1.1", b"A: 1", b"B: 2", b"C: 3"]),
            Err(Error::TooManyHeaders { count: 3, limit: 2 })
        ));
    }

    #[test]
    fn payload_drain_len() {
        let config = ParserConfig::default().max_body_size(10);
        assert_eq!(Payload::None.drain_len(&config), None);
        assert_eq!(Payload::Ignored { declared: Some(5) }.drain_len(&config), Some(5));
        assert_eq!(Payload::Ignored { declared: Some(11) }.drain_len(&config), None);
        assert_eq!(Payload::Ignored { declared: None }.drain_len(&config), None);
        let config = config.drain_body(false);
        assert_eq!(Payload::Ignored { declared: Some(5) }.drain_len(&config), None);
    }
}
