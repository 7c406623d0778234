//! RequestParser のプロパティテスト

use std::collections::HashMap;

use http11_lines::{Method, ParserConfig, RequestParser, parse_request};
use pbt::{build_request, chunk_size, header_name, header_value, method_token, target, version};
use proptest::prelude::*;

fn plain_headers() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec(
        (
            header_name().prop_filter("no body", |n| n != "Content-Length"),
            header_value(),
        ),
        0..8,
    )
}

fn expected_headers(headers: &[(String, String)]) -> HashMap<String, Vec<u8>> {
    let mut map = HashMap::new();
    for (name, value) in headers {
        map.insert(name.clone(), value.as_bytes().to_vec());
    }
    map
}

proptest! {
    #[test]
    fn parsed_request_matches_input(
        method in method_token(),
        target in target(),
        version in version(),
        headers in plain_headers(),
        chunk_size in chunk_size()
    ) {
        let input = build_request(&method, &target, &version, &headers);
        let config = ParserConfig::default().read_chunk_size(chunk_size);
        let request = parse_request(&input[..], config).unwrap().unwrap();

        prop_assert_eq!(request.method(), &Method::from_token(method.as_bytes()));
        prop_assert_eq!(request.target(), target.as_bytes());
        prop_assert_eq!(request.version(), version.as_bytes());
        // 同名ヘッダーは後勝ち
        prop_assert_eq!(request.headers(), &expected_headers(&headers));
        prop_assert!(request.body().is_empty());
    }
}

proptest! {
    #[test]
    fn parsing_is_deterministic(
        method in method_token(),
        target in target(),
        version in version(),
        headers in plain_headers(),
        chunk_size in chunk_size()
    ) {
        let input = build_request(&method, &target, &version, &headers);
        let first = parse_request(&input[..], ParserConfig::default()).unwrap();
        let second = parse_request(
            &input[..],
            ParserConfig::default().read_chunk_size(chunk_size),
        )
        .unwrap();
        prop_assert_eq!(first, second);
    }
}

proptest! {
    #[test]
    fn declared_body_is_drained(
        body in proptest::collection::vec(any::<u8>(), 0..256),
        chunk_size in chunk_size()
    ) {
        let mut input = format!(
            "POST /upload HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
            body.len()
        )
        .into_bytes();
        input.extend_from_slice(&body);
        input.extend_from_slice(b"GET /next HTTP/1.1\r\n\r\n");

        let config = ParserConfig::default().read_chunk_size(chunk_size);
        let mut parser = RequestParser::with_config(&input[..], config);

        let first = parser.parse().unwrap().unwrap();
        prop_assert_eq!(first.method(), &Method::Post);
        prop_assert!(first.body().is_empty());

        let second = parser.parse().unwrap().unwrap();
        prop_assert_eq!(second.method(), &Method::Get);
        prop_assert_eq!(second.target(), b"/next");

        prop_assert_eq!(parser.parse().unwrap(), None);
    }
}

proptest! {
    #[test]
    fn truncated_header_block_keeps_parsed_headers(
        headers in plain_headers(),
        chunk_size in chunk_size()
    ) {
        // 空行の前でストリームが終わる
        let mut input = build_request("GET", "/", "1.1", &headers);
        input.truncate(input.len() - 2);

        let config = ParserConfig::default().read_chunk_size(chunk_size);
        let request = parse_request(&input[..], config).unwrap().unwrap();
        prop_assert_eq!(request.headers(), &expected_headers(&headers));
    }
}
