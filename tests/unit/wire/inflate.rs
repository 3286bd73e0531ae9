use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;

use super::*;

#[test]
fn inflates_zlib_payload() {
    let data = b"movie entity bytes";
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    let compressed = encoder.finish().unwrap();

    assert_eq!(inflate(&compressed).unwrap(), data);
}

#[test]
fn corrupt_stream_is_inflate_error() {
    let err = inflate(b"\x78\x9c\xff\xff\xff").unwrap_err();
    assert!(matches!(err, SvgaError::Inflate(_)));
}

#[test]
fn truncated_stream_is_inflate_error() {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&[7u8; 256]).unwrap();
    let compressed = encoder.finish().unwrap();

    let err = inflate(&compressed[..compressed.len() / 2]).unwrap_err();
    assert!(matches!(err, SvgaError::Inflate(_)));
}
