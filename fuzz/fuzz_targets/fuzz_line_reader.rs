#![no_main]

use arbitrary::Arbitrary;
use http11_lines::{LineBuffer, LineReader, ParserConfig};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzLines {
    delimiter: Vec<u8>,
    chunk_size: u8,
    data: Vec<u8>,
}

fuzz_target!(|input: FuzzLines| {
    let config = ParserConfig::unlimited()
        .delimiter(&input.delimiter)
        .read_chunk_size(input.chunk_size as usize);
    let delimiter = config.delimiter.clone();

    let mut reader = LineReader::with_config(&input.data[..], config);
    let mut from_reader = Vec::new();
    while let Ok(Some(line)) = reader.read_line() {
        from_reader.push(line);
    }

    // 一括で渡した LineBuffer と同じ行になること
    let mut buffer = LineBuffer::new();
    buffer.extend(&input.data);
    let mut from_buffer = Vec::new();
    while let Some(line) = buffer.take_line(&delimiter) {
        from_buffer.push(line);
    }

    assert_eq!(from_reader, from_buffer);
    assert_eq!(reader.buffered(), buffer.as_slice());
});
