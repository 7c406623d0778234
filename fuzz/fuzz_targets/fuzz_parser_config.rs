#![no_main]

use arbitrary::Arbitrary;
use http11_lines::{ParserConfig, RequestParser};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzConfig {
    chunk_size: u16,
    max_line_size: u16,
    max_headers: u8,
    drain_body: bool,
    max_body_size: u16,
    data: Vec<u8>,
}

fuzz_target!(|input: FuzzConfig| {
    let config = ParserConfig::default()
        .read_chunk_size(input.chunk_size as usize)
        .max_line_size(input.max_line_size as usize)
        .max_headers(input.max_headers as usize)
        .drain_body(input.drain_body)
        .max_body_size(input.max_body_size as usize);

    let mut parser = RequestParser::with_config(&input.data[..], config);
    while let Ok(Some(request)) = parser.parse() {
        assert!(request.headers().len() <= input.max_headers as usize);
    }
});
