use std::collections::HashMap;

use crate::request::Request;

/// HTTP レスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// プロトコルバージョン (`HTTP/` を除いた部分、例: `1.1`)
    pub version: Vec<u8>,
    /// ステータスコード (200, 404, etc.)
    pub status: u16,
    /// ヘッダー (エンコード時には出力しない)
    pub headers: HashMap<String, Vec<u8>>,
    /// ボディ
    pub body: Vec<u8>,
}

impl Response {
    /// 新しいレスポンスを作成
    pub fn new(version: &[u8], status: u16) -> Self {
        Self {
            version: version.to_vec(),
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// リクエストと同じバージョンでレスポンスを作成
    pub fn for_request(request: &Request, status: u16) -> Self {
        Self::new(request.version(), status)
    }

    /// エラー応答を作成 (HTTP/1.1)
    ///
    /// リクエストのバージョンが分からない場合に使う。
    pub fn error(status: u16) -> Self {
        Self::new(b"1.1", status)
    }

    /// ヘッダーを追加 (ビルダーパターン)
    pub fn header(mut self, name: &str, value: &[u8]) -> Self {
        self.headers.insert(name.to_string(), value.to_vec());
        self
    }

    /// ボディを設定 (ビルダーパターン)
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// ステータスコードが成功 (2xx) か確認
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// ステータスコードがクライアントエラー (4xx) か確認
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// ステータスコードがサーバーエラー (5xx) か確認
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}
