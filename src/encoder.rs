use crate::config::DEFAULT_DELIMITER;
use crate::response::Response;
use crate::status::reason_phrase;

/// レスポンスをエンコード
///
/// `HTTP/<version> <status> <reason><body>` の後に CRLF を付ける。
/// ヘッダーは出力しない。
pub fn encode_response(response: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line: HTTP/VERSION SP STATUS-CODE SP REASON-PHRASE
    buf.extend_from_slice(b"HTTP/");
    buf.extend_from_slice(&response.version);
    buf.push(b' ');
    buf.extend_from_slice(response.status.to_string().as_bytes());
    buf.push(b' ');
    buf.extend_from_slice(reason_phrase(response.status).as_bytes());

    // Body
    buf.extend_from_slice(&response.body);

    buf.extend_from_slice(DEFAULT_DELIMITER);

    buf
}

impl Response {
    /// レスポンスをバイト列にエンコード
    pub fn encode(&self) -> Vec<u8> {
        encode_response(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_only() {
        let response = Response::new(b"1.1", 200);
        assert_eq!(response.encode(), b"HTTP/1.1 200 OK\r\n");
    }

    #[test]
    fn body_follows_reason() {
        let response = Response::new(b"1.0", 404).body(b"nothing here".to_vec());
        assert_eq!(response.encode(), b"HTTP/1.0 404 Not Foundnothing here\r\n");
    }

    #[test]
    fn headers_are_not_emitted() {
        let response = Response::new(b"1.1", 200).header("Content-Type", b"text/plain");
        assert_eq!(encode_response(&response), b"HTTP/1.1 200 OK\r\n");
    }

    #[test]
    fn unknown_status_has_empty_reason() {
        let response = Response::new(b"1.1", 299);
        assert_eq!(response.encode(), b"HTTP/1.1 299 \r\n");
    }
}
