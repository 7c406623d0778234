//! tokio_http11_lines - Tokio integration for http11_lines
//!
//! tokio を使用した非同期 HTTP/1.1 サーバーライブラリ。
//!
//! ## Features
//!
//! - `server` - HTTP サーバー機能 (デフォルト有効)
//! - `full` - すべての機能を有効化
//!
//! ## 特徴
//!
//! - **http11_lines ベース**: Sans I/O の `LineBuffer` と `RequestAssembler` を非同期 I/O で駆動
//! - **接続ごとのタスク**: accept した接続ごとに `tokio::spawn` する
//! - **タイムアウト**: リクエスト読み込みのタイムアウトを設定できる
//! - **エラー応答**: 不正なリクエストには 400 などのステータス行を返す
//!
//! ## サーバー
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

pub mod error;
pub mod reader;
#[cfg(feature = "server")]
pub mod server;

pub use error::{Error, Result};
pub use reader::{AsyncLineReader, AsyncRequestParser};
#[cfg(feature = "server")]
pub use server::{Handler, Server};

// http11_lines の型を re-export
pub use http11_lines::{Method, ParserConfig, Request, Response};
