use std::collections::HashMap;
use std::fmt;

/// HTTP メソッド
///
/// 既知のメソッド以外もトークンのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    /// 未知のメソッド (受信したトークンそのまま)
    Other(String),
}

impl Method {
    /// トークンからメソッドを作成 (大文字小文字を区別する)
    pub fn from_token(token: &[u8]) -> Self {
        match token {
            b"GET" => Method::Get,
            b"POST" => Method::Post,
            b"PUT" => Method::Put,
            b"DELETE" => Method::Delete,
            other => Method::Other(String::from_utf8_lossy(other).into_owned()),
        }
    }

    /// メソッド名
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Other(token) => token,
        }
    }

    /// 既知のメソッドかどうか
    pub fn is_known(&self) -> bool {
        !matches!(self, Method::Other(_))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP リクエスト
///
/// 組み立て後は変更できない。ボディは常に空。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    target: Vec<u8>,
    version: Vec<u8>,
    headers: HashMap<String, Vec<u8>>,
    body: Vec<u8>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        target: Vec<u8>,
        version: Vec<u8>,
        headers: HashMap<String, Vec<u8>>,
    ) -> Self {
        Self {
            method,
            target,
            version,
            headers,
            body: Vec::new(),
        }
    }

    /// メソッド
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// リクエストターゲット (パスとクエリ、未加工)
    pub fn target(&self) -> &[u8] {
        &self.target
    }

    /// プロトコルバージョン (`HTTP/` を除いた部分、例: `1.1`)
    pub fn version(&self) -> &[u8] {
        &self.version
    }

    /// ヘッダー
    pub fn headers(&self) -> &HashMap<String, Vec<u8>> {
        &self.headers
    }

    /// ヘッダーを取得 (大文字小文字を区別する)
    pub fn header(&self, name: &str) -> Option<&[u8]> {
        self.headers.get(name).map(Vec::as_slice)
    }

    /// ボディ (常に空)
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} HTTP/{}",
            self.method,
            String::from_utf8_lossy(&self.target),
            String::from_utf8_lossy(&self.version)
        )
    }
}
