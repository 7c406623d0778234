#![no_main]

use http11_lines::{Error, Progress, RequestAssembler};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|lines: Vec<Option<Vec<u8>>>| {
    let mut assembler = RequestAssembler::new();
    let mut finished = false;

    for line in lines {
        match assembler.push_line(line) {
            Ok(Progress::NeedLine) => assert!(!finished),
            Ok(_)
            | Err(
                Error::RequestLine { .. }
                | Error::Version { .. }
                | Error::Header { .. }
                | Error::TooManyHeaders { .. },
            ) => {
                assert!(!finished);
                finished = true;
            }
            Err(Error::Finished) => assert!(finished),
            Err(e) => panic!("unexpected error: {:?}", e),
        }
        assert_eq!(assembler.is_finished(), finished);
    }
});
