//! HTTP/1.1 リクエストデコーダーモジュール
//!
//! 行単位でリクエストを組み立てる。
//!
//! - `LineBuffer`: 未消費のバイト列から区切りまでを 1 行として取り出す (Sans I/O)
//! - `LineReader`: `std::io::Read` から `LineBuffer` を使って 1 行ずつ読む
//! - `RequestAssembler`: 行を受け取ってリクエストを組み立てる状態機械 (Sans I/O)
//! - `RequestParser`: `LineReader` と `RequestAssembler` をつなぐ
//!
//! ## 使い方
//!
//! ```rust
//! use http11_lines::{Method, RequestParser};
//!
//! let data = b"GET /hello HTTP/1.1\r\nHost: example.com\r\n\r\n";
//! let mut parser = RequestParser::new(&data[..]);
//! let request = parser.parse().unwrap().unwrap();
//! assert_eq!(request.method(), &Method::Get);
//! assert_eq!(request.target(), b"/hello");
//! assert_eq!(request.header("Host"), Some(&b" example.com"[..]));
//! ```
//!
//! ### 非同期 I/O と組み合わせる
//!
//! ```rust
//! use http11_lines::{LineBuffer, Progress, RequestAssembler};
//!
//! let mut buffer = LineBuffer::new();
//! let mut assembler = RequestAssembler::new();
//!
//! // 受信データを extend...
//! buffer.extend(b"GET / HTTP/1.1\r\n\r\n");
//! while let Some(line) = buffer.take_line(b"\r\n") {
//!     if let Progress::Complete { request, .. } = assembler.push_line(Some(line)).unwrap() {
//!         assert_eq!(request.target(), b"/");
//!         break;
//!     }
//! }
//! ```

mod assembler;
mod header_line;
mod line;
mod parser;
mod phase;
mod request_line;

// 公開 API
pub use assembler::{Payload, Progress, RequestAssembler};
pub use header_line::decode_header_line;
pub use line::{DISCARD_CHUNK_SIZE, LineBuffer, LineReader};
pub use parser::{RequestParser, parse_request};
pub use phase::RequestState;
pub use request_line::decode_request_line;
