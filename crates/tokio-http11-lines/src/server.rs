//! HTTP サーバー
//!
//! tokio を使用した非同期 HTTP サーバー。
//! 接続ごとにタスクを起動し、リクエストを 1 つ読んで応答を返したら接続を閉じる。
//!
//! ## 使い方
//!
//! ```ignore
//! use tokio_http11_lines::{Request, Response, Server};
//!
//! async fn handler(request: Request) -> Response {
//!     Response::for_request(&request, 200)
//! }
//!
//! let server = Server::bind("0.0.0.0:6969").await?;
//! server.serve(handler).await?;
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http11_lines::{ParserConfig, Request, Response};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::error::{Error, Result};
use crate::reader::AsyncRequestParser;

/// HTTP リクエストハンドラー
pub trait Handler: Send + Sync + 'static {
    /// リクエストを処理してレスポンスを返す
    fn handle(&self, request: Request) -> impl Future<Output = Response> + Send;
}

/// 関数からハンドラーを作成
impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send,
{
    fn handle(&self, request: Request) -> impl Future<Output = Response> + Send {
        (self)(request)
    }
}

/// HTTP サーバー
pub struct Server {
    listener: TcpListener,
    read_timeout: Option<Duration>,
    parser_config: ParserConfig,
}

impl Server {
    /// 指定アドレスにバインド
    pub async fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self::from_listener(listener))
    }

    /// バインド済みのリスナーから作成
    pub fn from_listener(listener: TcpListener) -> Self {
        Self {
            listener,
            read_timeout: Some(Duration::from_secs(60)),
            parser_config: ParserConfig::default(),
        }
    }

    /// リクエスト読み込みのタイムアウトを設定
    ///
    /// `None` の場合は無期限に待つ。
    pub fn read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// パーサーの設定を指定
    pub fn parser_config(mut self, config: ParserConfig) -> Self {
        self.parser_config = config;
        self
    }

    /// ローカルアドレスを取得
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// サーバーを起動
    ///
    /// accept のエラーはログに出し、少し待ってから待ち受けを続ける。
    pub async fn serve<H: Handler>(self, handler: H) -> Result<()> {
        let config = Arc::new(self.connection_config());
        let handler = Arc::new(handler);
        let listener = &self.listener;

        loop {
            let (stream, peer_addr) =
                accept_with_retry(move || listener.accept(), ACCEPT_RETRY_DELAY).await;
            let config = config.clone();
            let handler = handler.clone();

            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, peer_addr, config, handler).await {
                    tracing::warn!(%peer_addr, error = %e, "connection error");
                }
            });
        }
    }

    /// 単一の接続を処理 (テスト用)
    pub async fn handle_one<H: Handler>(self, handler: H) -> Result<()> {
        let (stream, peer_addr) = self.listener.accept().await?;
        let config = Arc::new(self.connection_config());
        handle_connection(stream, peer_addr, config, Arc::new(handler)).await
    }

    fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            read_timeout: self.read_timeout,
            parser_config: self.parser_config.clone(),
        }
    }
}

/// accept に失敗してから次の accept までの待ち時間
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// 成功するまで accept を繰り返す
async fn accept_with_retry<F, Fut, T>(mut accept: F, retry_delay: Duration) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<T>>,
{
    loop {
        match accept().await {
            Ok(accepted) => return accepted,
            Err(e) => {
                tracing::warn!(error = %e, "accept failed");
                tokio::time::sleep(retry_delay).await;
            }
        }
    }
}

struct ConnectionConfig {
    read_timeout: Option<Duration>,
    parser_config: ParserConfig,
}

/// TCP 接続を処理
async fn handle_connection<H: Handler>(
    stream: TcpStream,
    peer_addr: SocketAddr,
    config: Arc<ConnectionConfig>,
    handler: Arc<H>,
) -> Result<()> {
    tracing::debug!(%peer_addr, "accepted connection");
    let (reader, writer) = stream.into_split();
    serve_stream(reader, writer, &config, handler.as_ref()).await
}

/// リクエストを 1 つ読み込み、応答を書き込んで閉じる
///
/// デコードエラーやタイムアウトの場合はエラー応答を返してからエラーを返す。
async fn serve_stream<R, W, H>(
    reader: R,
    mut writer: W,
    config: &ConnectionConfig,
    handler: &H,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    H: Handler,
{
    let mut parser = AsyncRequestParser::with_config(reader, config.parser_config.clone());
    let parsed = match config.read_timeout {
        Some(timeout) => tokio::time::timeout(timeout, parser.parse())
            .await
            .map_err(Error::from)
            .and_then(|r| r),
        None => parser.parse().await,
    };

    let request = match parsed {
        Ok(Some(request)) => request,
        Ok(None) => {
            tracing::debug!("connection closed before request line");
            return Ok(());
        }
        Err(e) => {
            if let Some(status) = e.status_code() {
                write_response(&mut writer, &Response::error(status)).await?;
            }
            return Err(e);
        }
    };

    tracing::info!(
        method = %request.method(),
        request_target = %String::from_utf8_lossy(request.target()),
        "request"
    );
    let response = handler.handle(request).await;
    write_response(&mut writer, &response).await
}

async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(&response.encode()).await?;
    writer.flush().await?;
    writer.shutdown().await?;
    Ok(())
}
