use crate::error::Error;

/// ヘッダー行をパース
///
/// 最初の `:` で名前と値に分割する。値の前後の空白はそのまま残す。
pub fn decode_header_line(line: &[u8]) -> Result<(String, Vec<u8>), Error> {
    let Some(pos) = line.iter().position(|&b| b == b':') else {
        return Err(Error::Header {
            line: String::from_utf8_lossy(line).into_owned(),
        });
    };
    let name = String::from_utf8_lossy(&line[..pos]).into_owned();
    Ok((name, line[pos + 1..].to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_not_trimmed() {
        let (name, value) = decode_header_line(b"Host: example.com").unwrap();
        assert_eq!(name, "Host");
        assert_eq!(value, b" example.com");
    }

    #[test]
    fn splits_on_first_colon() {
        let (name, value) = decode_header_line(b"Host: example.com:8080").unwrap();
        assert_eq!(name, "Host");
        assert_eq!(value, b" example.com:8080");
    }

    #[test]
    fn empty_name_and_value() {
        let (name, value) = decode_header_line(b":").unwrap();
        assert_eq!(name, "");
        assert!(value.is_empty());
    }

    #[test]
    fn missing_colon() {
        assert!(matches!(
            decode_header_line(b"Malformed"),
            Err(Error::Header { line }) if line == "Malformed"
        ));
    }
}
