//! Fixed-length, zero-padded octet string fields.
//!
//! Every string-typed field in an SMGP packet occupies a fixed number of
//! bytes: shorter values are padded with `0x00`, longer values are
//! truncated. This module centralizes that rule so packet bodies read as
//! plain field lists rather than repeating the pad/truncate dance.

use bytes::{Buf, BufMut};

use crate::error::ProtocolError;
use crate::prelude::*;

/// Read a fixed-length octet string field, trimming trailing `0x00` bytes
/// and decoding the remainder as UTF-8.
pub fn read_fixed_str(src: &mut impl Buf, len: usize) -> Result<String, ProtocolError> {
    if src.remaining() < len {
        return Err(ProtocolError::IncompletePacket {
            expected: len,
            actual: src.remaining(),
        });
    }
    let mut raw = vec![0u8; len];
    src.copy_to_slice(&mut raw);
    let trimmed_len = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8(raw[..trimmed_len].to_vec())
        .map_err(|e| ProtocolError::InvalidOctetString(e.to_string()))
}

/// Read a fixed-length field as raw bytes (no trimming, no decoding) —
/// used for binary fields such as `AuthenticatorClient`.
pub fn read_fixed_bytes(src: &mut impl Buf, len: usize) -> Result<Vec<u8>, ProtocolError> {
    if src.remaining() < len {
        return Err(ProtocolError::IncompletePacket {
            expected: len,
            actual: src.remaining(),
        });
    }
    let mut raw = vec![0u8; len];
    src.copy_to_slice(&mut raw);
    Ok(raw)
}

/// Write a string into a fixed-length field, truncating to `len` bytes and
/// zero-padding any remainder.
pub fn write_fixed_str(dst: &mut impl BufMut, s: &str, len: usize) {
    let bytes = s.as_bytes();
    let take = bytes.len().min(len);
    dst.put_slice(&bytes[..take]);
    for _ in take..len {
        dst.put_u8(0);
    }
}

/// Write raw bytes into a fixed-length field, truncating or zero-padding to
/// exactly `len` bytes.
pub fn write_fixed_bytes(dst: &mut impl BufMut, bytes: &[u8], len: usize) {
    let take = bytes.len().min(len);
    dst.put_slice(&bytes[..take]);
    for _ in take..len {
        dst.put_u8(0);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn short_string_is_zero_padded() {
        let mut buf = BytesMut::new();
        write_fixed_str(&mut buf, "ab", 8);
        assert_eq!(buf.as_ref(), b"ab\0\0\0\0\0\0");
    }

    #[test]
    fn long_string_is_truncated() {
        let mut buf = BytesMut::new();
        write_fixed_str(&mut buf, "abcdefgh", 4);
        assert_eq!(buf.as_ref(), b"abcd");
    }

    #[test]
    fn round_trip_trims_padding() {
        let mut buf = BytesMut::new();
        write_fixed_str(&mut buf, "10000001", 8);
        let mut cursor = buf.freeze();
        assert_eq!(read_fixed_str(&mut cursor, 8).unwrap(), "10000001");
    }
}
