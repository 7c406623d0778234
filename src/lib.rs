//! # http11_lines
//!
//! 行単位で HTTP/1.1 リクエストを組み立てるパーサーと、ステータス行のエンコーダー
//!
//! ## 特徴
//!
//! - **インクリメンタル**: ストリームから少しずつ読み、1 行が何回の read にまたがっても正しく再開する
//! - **Sans I/O**: 行の切り出しとリクエスト組み立ては I/O から分離されている
//! - **設定の明示**: 行区切りや読み込みサイズは `ParserConfig` で接続ごとに渡す
//!
//! ## 使い方
//!
//! ```rust
//! use http11_lines::{ParserConfig, RequestParser, Response};
//!
//! // リクエストをパース
//! let data = b"GET / HTTP/1.1\r\nHost: x\r\n\r\n";
//! let mut parser = RequestParser::with_config(&data[..], ParserConfig::default());
//! let request = parser.parse().unwrap().unwrap();
//!
//! // レスポンスを作成してエンコード
//! let response = Response::for_request(&request, 200);
//! assert_eq!(response.encode(), b"HTTP/1.1 200 OK\r\n");
//! ```

mod config;
mod decoder;
mod encoder;
mod error;
mod request;
mod response;
pub mod status;

pub use config::{DEFAULT_DELIMITER, ParserConfig};
pub use decoder::{
    DISCARD_CHUNK_SIZE, LineBuffer, LineReader, Payload, Progress, RequestAssembler, RequestParser, RequestState,
    decode_header_line, decode_request_line, parse_request,
};
pub use encoder::encode_response;
pub use error::Error;
pub use request::{Method, Request};
pub use response::Response;
pub use status::reason_phrase;
