//! tokio-http11-lines エラー型

use thiserror::Error;

/// tokio-http11-lines エラー
#[derive(Debug, Error)]
pub enum Error {
    /// I/O エラー
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// HTTP パースエラー
    #[error("HTTP error: {0}")]
    Http(#[from] http11_lines::Error),
    /// リクエスト読み込みタイムアウト
    #[error("request read timeout")]
    Timeout,
}

impl Error {
    /// エラー応答に使うステータスコード
    ///
    /// 応答を返せない場合は `None` を返す。
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Io(_) => None,
            Error::Http(e) => e.status_code(),
            Error::Timeout => Some(408),
        }
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Error::Timeout
    }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
