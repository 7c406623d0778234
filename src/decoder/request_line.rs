use crate::error::Error;
use crate::request::Method;

/// リクエスト行をパース
///
/// `METHOD SP TARGET SP HTTP/VERSION` を 1 バイトの空白で分割する。
/// メソッドやターゲットの中身は検証しない。
pub fn decode_request_line(line: &[u8]) -> Result<(Method, Vec<u8>, Vec<u8>), Error> {
    let parts: Vec<&[u8]> = line.split(|&b| b == b' ').collect();
    let [method, target, protocol] = parts[..] else {
        return Err(Error::RequestLine {
            fields: parts.len(),
        });
    };

    let version_parts: Vec<&[u8]> = protocol.split(|&b| b == b'/').collect();
    let [name, version] = version_parts[..] else {
        return Err(version_error(protocol));
    };
    if name != b"HTTP" {
        return Err(version_error(protocol));
    }

    Ok((Method::from_token(method), target.to_vec(), version.to_vec()))
}

fn version_error(token: &[u8]) -> Error {
    Error::Version {
        token: String::from_utf8_lossy(token).into_owned(),
    }
}
