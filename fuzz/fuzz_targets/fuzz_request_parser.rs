#![no_main]

use http11_lines::{ParserConfig, RequestParser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // 1 バイトずつ読む場合と 17 バイトずつ読む場合で結果が変わらないこと
    // 行長の上限に届く入力も生成されるように小さめにする
    let config = ParserConfig::default().max_line_size(64);
    let mut one = RequestParser::with_config(data, config.clone());
    let mut many = RequestParser::with_config(data, config.read_chunk_size(17));

    loop {
        let a = one.parse();
        let b = many.parse();
        match (a, b) {
            (Ok(Some(a)), Ok(Some(b))) => {
                assert_eq!(a, b);
                assert!(a.body().is_empty());
            }
            (Ok(None), Ok(None)) => break,
            (Err(a), Err(b)) => {
                assert_eq!(a.status_code(), b.status_code());
                break;
            }
            (a, b) => panic!("chunk size changed the result: {:?} / {:?}", a, b),
        }
    }
});
