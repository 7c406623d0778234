//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// リクエスト行の要素
// ========================================

/// メソッドトークン (既知のメソッドと任意の大文字トークン)
pub fn method_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("GET".to_string()),
        Just("POST".to_string()),
        Just("PUT".to_string()),
        Just("DELETE".to_string()),
        "[A-Z]{1,10}".prop_map(|s| s),
        "[a-z]{1,10}".prop_map(|s| s),
    ]
}

/// リクエストターゲット (空白と CR/LF を含まない)
pub fn target() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_string()),
        Just("*".to_string()),
        "/[a-zA-Z0-9/_.?=&%#-]{1,48}".prop_map(|s| s),
    ]
}

/// `HTTP/` の後ろのバージョン
pub fn version() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("1.1".to_string()),
        Just("1.0".to_string()),
        "[0-9]\\.[0-9]".prop_map(|s| s),
    ]
}

// ========================================
// ヘッダー
// ========================================

/// ヘッダー名 (`:` と CR/LF を含まない)
pub fn header_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,24}".prop_map(|s| s)
}

/// ヘッダー値 (CR/LF を含まない、前後の空白や `:` は含みうる)
pub fn header_value() -> impl Strategy<Value = String> {
    "[ -~\t]{0,48}".prop_map(|s| s)
}

pub fn headers() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec((header_name(), header_value()), 0..8)
}

// ========================================
// 行
// ========================================

/// CRLF を含まない行 (単独の CR や LF は含みうる)
pub fn line() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..64).prop_map(|mut bytes| {
        // CRLF を崩す
        for i in 1..bytes.len() {
            if bytes[i - 1] == b'\r' && bytes[i] == b'\n' {
                bytes[i] = b'n';
            }
        }
        bytes
    })
}

/// 読み込みサイズ
pub fn chunk_size() -> impl Strategy<Value = usize> {
    prop_oneof![Just(1usize), 1usize..=8, 9usize..=4096]
}

/// リクエストのバイト列を組み立てる
pub fn build_request(
    method: &str,
    target: &str,
    version: &str,
    headers: &[(String, String)],
) -> Vec<u8> {
    let mut buf = format!("{} {} HTTP/{}\r\n", method, target, version).into_bytes();
    for (name, value) in headers {
        buf.extend_from_slice(name.as_bytes());
        buf.push(b':');
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }
    buf.extend_from_slice(b"\r\n");
    buf
}
