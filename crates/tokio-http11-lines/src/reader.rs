//! 非同期リクエストパーサー
//!
//! `http11_lines` の `LineBuffer` と `RequestAssembler` を `AsyncRead` で駆動する。

use std::io::ErrorKind;

use http11_lines::{
    DISCARD_CHUNK_SIZE, LineBuffer, ParserConfig, Payload, Progress, Request, RequestAssembler,
};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::Result;

/// `AsyncRead` から 1 行ずつ読み込むリーダー
#[derive(Debug)]
pub struct AsyncLineReader<R> {
    source: R,
    buffer: LineBuffer,
    chunk: Vec<u8>,
    config: ParserConfig,
}

impl<R: AsyncRead + Unpin> AsyncLineReader<R> {
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
    pub async fn read_line(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            let next = self
                .buffer
                .next_line(&self.config.delimiter, self.config.max_line_size)?;
            if next.is_some() {
                return Ok(next);
            }

            let n = match self.source.read(&mut self.chunk).await {
                Ok(0) => return Ok(None),
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(http11_lines::Error::StreamRead(e).into()),
            };
            self.buffer.extend(&self.chunk[..n]);
        }
    }

    /// 最大 `len` バイトを読み捨てる
    ///
    /// EOF に達した場合はそこで止める。実際に捨てたバイト数を返す。
    pub async fn discard(&mut self, len: usize) -> Result<usize> {
        let mut discarded = self.buffer.discard(len);
        let mut scratch = vec![0u8; DISCARD_CHUNK_SIZE.min(len - discarded)];
        while discarded < len {
            let want = (len - discarded).min(scratch.len());
            let n = match self.source.read(&mut scratch[..want]).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(http11_lines::Error::StreamRead(e).into()),
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

    /// ストリームを取り出す
    pub fn into_inner(self) -> R {
        self.source
    }
}

/// `AsyncRead` からリクエストを読み込むパーサー
#[derive(Debug)]
pub struct AsyncRequestParser<R> {
    reader: AsyncLineReader<R>,
}

impl<R: AsyncRead + Unpin> AsyncRequestParser<R> {
    /// デフォルト設定でパーサーを作成
    pub fn new(source: R) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    /// 設定付きでパーサーを作成
    pub fn with_config(source: R, config: ParserConfig) -> Self {
        Self {
            reader: AsyncLineReader::with_config(source, config),
        }
    }

    /// リクエストを 1 つ読み込む
    ///
    /// リクエスト行の前にストリームが終わった場合は `Ok(None)` を返す。
    pub async fn parse(&mut self) -> Result<Option<Request>> {
        let mut assembler = RequestAssembler::with_config(self.reader.config());
        loop {
            let line = self.reader.read_line().await?;
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
                    self.skip_payload(payload).await?;
                    return Ok(Some(request));
                }
            }
        }
    }

    async fn skip_payload(&mut self, payload: Payload) -> Result<()> {
        if let Some(len) = payload.drain_len(self.reader.config()) {
            let discarded = self.reader.discard(len).await?;
            tracing::debug!(declared = len, discarded, "drained request payload");
        }
        Ok(())
    }

    /// 読み込み済みで未消費のバイト列
    pub fn remaining(&self) -> &[u8] {
        self.reader.buffered()
    }

    /// ストリームを取り出す
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}
