//! ブロッキング I/O 用のリクエストパーサー

use std::io::Read;

use crate::config::ParserConfig;
use crate::error::Error;
use crate::request::Request;

use super::assembler::{Payload, Progress, RequestAssembler};
use super::line::LineReader;

/// `std::io::Read` からリクエストを読み込むパーサー
///
/// `LineReader` で 1 行ずつ読み、`RequestAssembler` に渡す。
#[derive(Debug)]
pub struct RequestParser<R> {
    reader: LineReader<R>,
}

impl<R: Read> RequestParser<R> {
    /// デフォルト設定でパーサーを作成
    pub fn new(source: R) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    /// 設定付きでパーサーを作成
    pub fn with_config(source: R, config: ParserConfig) -> Self {
        Self {
            reader: LineReader::with_config(source, config),
        }
    }

    /// リクエストを 1 つ読み込む
    ///
    /// リクエスト行の前にストリームが終わった場合は `Ok(None)` を返す。
    /// デコードエラーや読み込みエラーの場合は途中までのリクエストを返さない。
    pub fn parse(&mut self) -> Result<Option<Request>, Error> {
        let mut assembler = RequestAssembler::with_config(self.reader.config());
        loop {
            let line = self.reader.read_line()?;
            match assembler.push_line(line)? {
                Progress::NeedLine => {}
                Progress::Closed => {
                    if !self.reader.buffered().is_empty() {
                        tracing::warn!(
                            bytes = self.reader.buffered().len(),
                            "stream ended in the middle of the request line"
                        );
                    }
                    return Ok(None);
                }
                Progress::Complete { request, payload } => {
                    self.skip_payload(payload)?;
                    return Ok(Some(request));
                }
            }
        }
    }

    fn skip_payload(&mut self, payload: Payload) -> Result<(), Error> {
        if let Some(len) = payload.drain_len(self.reader.config()) {
            let discarded = self.reader.discard(len)?;
            tracing::debug!(declared = len, discarded, "drained request payload");
        }
        Ok(())
    }

    /// 読み込み済みで未消費のバイト列
    pub fn remaining(&self) -> &[u8] {
        self.reader.buffered()
    }

    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    /// ストリームを取り出す
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

/// ストリームからリクエストを 1 つ読み込む
pub fn parse_request<R: Read>(source: R, config: ParserConfig) -> Result<Option<Request>, Error> {
    RequestParser::with_config(source, config).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;

    #[test]
    fn parse_simple_request() {
        let request = parse_request(
            &b"GET / HTTP/1.1\r\nHost: x\r\n\r\n"[..],
            ParserConfig::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(request.method(), &Method::Get);
        assert_eq!(request.target(), b"/");
        assert_eq!(request.version(), b"1.1");
        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header("Host"), Some(&b" x"[..]));
        assert!(request.body().is_empty());
    }

    #[test]
    fn body_is_drained() {
        let data = b"POST / HTTP/1.1\r\nContent-Length: 5\r\n\r\nhelloNEXT";
        let mut parser = RequestParser::new(&data[..]);
        let request = parser.parse().unwrap().unwrap();
        assert_eq!(request.method(), &Method::Post);
        assert!(request.body().is_empty());
        let mut rest = Vec::new();
        parser.into_inner().read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"NEXT");
    }

    #[test]
    fn body_is_left_unread_when_drain_disabled() {
        let data = b"POST / HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let config = ParserConfig::default().drain_body(false);
        let mut parser = RequestParser::with_config(&data[..], config);
        parser.parse().unwrap().unwrap();
        let mut rest = Vec::new();
        parser.into_inner().read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"hello");
    }

    #[test]
    fn empty_stream() {
        assert!(
            parse_request(&b""[..], ParserConfig::default())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn unterminated_request_line() {
        let mut parser = RequestParser::new(&b"GET / HTTP/1.1"[..]);
        assert!(parser.parse().unwrap().is_none());
        assert_eq!(parser.remaining(), b"GET / HTTP/1.1");
    }
}
