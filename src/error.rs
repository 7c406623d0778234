use thiserror::Error;

/// リクエストのパースエラー
#[derive(Debug, Error)]
pub enum Error {
    /// リクエスト行のフィールド数が 3 ではない
    #[error("failed to parse request line: expected 3 fields, got {fields}")]
    RequestLine { fields: usize },
    /// プロトコルバージョンが `HTTP/<version>` の形ではない
    #[error("failed to parse HTTP version: {token:?}")]
    Version { token: String },
    /// ヘッダー行に `:` がない
    #[error("failed to parse HTTP header: {line:?}")]
    Header { line: String },
    /// 下位ストリームの読み込みエラー (EOF は含まない)
    #[error("stream read error: {0}")]
    StreamRead(#[from] std::io::Error),
    /// 区切りが見つからないまま行が長くなりすぎた
    #[error("line too long: {size} > {limit}")]
    LineTooLong { size: usize, limit: usize },
    /// ヘッダー数超過
    #[error("too many headers: {count} > {limit}")]
    TooManyHeaders { count: usize, limit: usize },
    /// リクエスト組み立て完了後に行が渡された
    #[error("request already assembled")]
    Finished,
}

impl Error {
    /// エラー応答に使うステータスコード
    ///
    /// 読み込みエラーなど、応答を返せない場合は `None` を返す。
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::RequestLine { .. } | Error::Version { .. } | Error::Header { .. } => Some(400),
            Error::LineTooLong { .. } | Error::TooManyHeaders { .. } => Some(431),
            Error::StreamRead(_) | Error::Finished => None,
        }
    }

    /// 下位ストリームのエラーかどうか
    pub fn is_stream_error(&self) -> bool {
        matches!(self, Error::StreamRead(_))
    }
}
