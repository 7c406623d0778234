//! 行の切り出し

use std::io::{ErrorKind, Read};

use crate::config::ParserConfig;
use crate::error::Error;

/// ボディ読み捨て時の 1 回あたりの最大読み込みサイズ
pub const DISCARD_CHUNK_SIZE: usize = 8 * 1024;

/// 読み込み済みで未消費のバイト列 (Sans I/O)
///
/// 受信データを `extend()` で追加し、`take_line()` で区切りまでを 1 行として取り出す。
/// 取り出されなかった残りは次の呼び出しに持ち越される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    buf: Vec<u8>,
    /// この位置より前に区切りがないことは確認済み
    scanned: usize,
}

impl LineBuffer {
    /// 空のバッファを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// データを追加
    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// 最初の区切りまでを 1 行として取り出す (区切りは含まない)
    ///
    /// 区切りが見つからない場合は `None` を返し、バッファはそのまま残す。
    pub fn take_line(&mut self, delimiter: &[u8]) -> Option<Vec<u8>> {
        if delimiter.is_empty() {
            return None;
        }
        match find(&self.buf[self.scanned..], delimiter) {
            Some(pos) => {
                let end = self.scanned + pos;
                let line = self.buf[..end].to_vec();
                self.buf.drain(..end + delimiter.len());
                self.scanned = 0;
                Some(line)
            }
            None => {
                // 区切りの途中までが末尾にある可能性があるのでその分は再走査する
                self.scanned = self.buf.len().saturating_sub(delimiter.len() - 1);
                None
            }
        }
    }

    /// 次の 1 行を取り出し、行長の上限を確認する
    ///
    /// 区切りが見つかった行は区切りを除いた長さで判定する。
    /// 見つからない場合は未消費の部分だけを判定して `Ok(None)` を返す。
    pub fn next_line(&mut self, delimiter: &[u8], limit: usize) -> Result<Option<Vec<u8>>, Error> {
        match self.take_line(delimiter) {
            Some(line) if line.len() > limit => Err(Error::LineTooLong {
                size: line.len(),
                limit,
            }),
            Some(line) => Ok(Some(line)),
            None => self.check_line_size(delimiter, limit).map(|()| None),
        }
    }

    /// 先頭から最大 `len` バイトを捨てる
    ///
    /// 実際に捨てたバイト数を返す。
    pub fn discard(&mut self, len: usize) -> usize {
        let n = len.min(self.buf.len());
        self.buf.drain(..n);
        self.scanned = 0;
        n
    }

    /// 区切りのない部分が長すぎないか確認
    pub fn check_line_size(&self, delimiter: &[u8], limit: usize) -> Result<(), Error> {
        // 末尾に区切りの一部が来ている場合を許容する
        let allowed = limit.saturating_add(delimiter.len().saturating_sub(1));
        if self.buf.len() > allowed {
            return Err(Error::LineTooLong {
                size: self.buf.len(),
                limit,
            });
        }
        Ok(())
    }

    /// 未消費のバイト列
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// ストリームから 1 行ずつ読み込むリーダー
///
/// `read_chunk_size` バイトずつ読み込み、区切りが見つかるまで繰り返す。
/// 1 行が何回の read にまたがっても、前回の残りから正確に再開する。
#[derive(Debug)]
pub struct LineReader<R> {
    source: R,
    buffer: LineBuffer,
    chunk: Vec<u8>,
    config: ParserConfig,
}

impl<R: Read> LineReader<R> {
    /// デフォルト設定でリーダーを作成
    pub fn new(source: R) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    /// 設定付きでリーダーを作成
    pub fn with_config(source: R, config: ParserConfig) -> Self {
        Self {
            source,
            buffer: LineBuffer::new(),
            chunk: vec![0u8; config.read_chunk_size.max(1)],
            config,
        }
    }

    /// 次の 1 行を読み込む
    ///
    /// 区切りが見つかる前に EOF に達した場合は `Ok(None)` を返す。
    /// 区切りのない途中のデータは `buffered()` に残る。
    pub fn read_line(&mut self) -> Result<Option<Vec<u8>>, Error> {
        loop {
            let next = self
                .buffer
                .next_line(&self.config.delimiter, self.config.max_line_size)?;
            if next.is_some() {
                return Ok(next);
            }

            let n = match self.source.read(&mut self.chunk) {
                Ok(0) => return Ok(None),
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::StreamRead(e)),
            };
            self.buffer.extend(&self.chunk[..n]);
        }
    }

    /// 最大 `len` バイトを読み捨てる
    ///
    /// バッファに残っている分を先に捨て、足りなければストリームから読む。
    /// EOF に達した場合はそこで止める。実際に捨てたバイト数を返す。
    pub fn discard(&mut self, len: usize) -> Result<usize, Error> {
        let mut discarded = self.buffer.discard(len);
        let mut scratch = vec![0u8; DISCARD_CHUNK_SIZE.min(len - discarded)];
        while discarded < len {
            let want = (len - discarded).min(scratch.len());
            let n = match self.source.read(&mut scratch[..want]) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::StreamRead(e)),
            };
            discarded += n;
        }
        Ok(discarded)
    }

    /// 読み込み済みで未消費のバイト列
    pub fn buffered(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// ストリームを取り出す (未消費のバイト列は破棄される)
    pub fn into_inner(self) -> R {
        self.source
    }
}
