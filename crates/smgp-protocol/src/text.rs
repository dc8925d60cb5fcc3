//! Text transcoding, the authenticator digest, timestamp formatting, and
//! `MsgID` packing.
//!
//! Gated behind the `text` feature since it pulls in `encoding_rs` and
//! `md-5` — the pure header/packet codecs above have no such dependency.

use encoding_rs::{GB18030, UTF_16BE};
use md5::{Digest, Md5};

use crate::error::ProtocolError;
use crate::octet::write_fixed_bytes;
use crate::prelude::*;

/// Convert UTF-8 text to UCS-2 (big-endian UTF-16), the wire encoding used
/// when `MsgFormat == Ucs2`.
#[must_use]
pub fn utf8_to_ucs2(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() * 2);
    for unit in s.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

/// Convert UCS-2 (big-endian UTF-16) bytes back to UTF-8.
pub fn ucs2_to_utf8(bytes: &[u8]) -> Result<String, ProtocolError> {
    if bytes.len() % 2 != 0 {
        return Err(ProtocolError::InvalidEncoding(
            "UCS-2 payload has an odd byte length".into(),
        ));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| ProtocolError::InvalidEncoding(e.to_string()))
}

/// Convert UTF-8 text to GB18030, the wire encoding used when
/// `MsgFormat == Gb18030`.
#[must_use]
pub fn utf8_to_gb18030(s: &str) -> Vec<u8> {
    let (bytes, _, _) = GB18030.encode(s);
    bytes.into_owned()
}

/// Convert GB18030 bytes back to UTF-8.
pub fn gb18030_to_utf8(bytes: &[u8]) -> Result<String, ProtocolError> {
    let (text, _, had_errors) = GB18030.decode(bytes);
    if had_errors {
        return Err(ProtocolError::InvalidEncoding(
            "GB18030 payload contained unmappable bytes".into(),
        ));
    }
    Ok(text.into_owned())
}

/// Also accept `UTF_16BE`-labelled data directly, for callers that already
/// hold an `encoding_rs` decision (e.g. a collation table lookup upstream).
#[must_use]
pub fn ucs2_to_utf8_lossy(bytes: &[u8]) -> String {
    let (text, _, _) = UTF_16BE.decode(bytes);
    text.into_owned()
}

/// Compute `AuthenticatorClient = MD5(ClientID(8) || 0x00*7 || Secret ||
/// Timestamp(10 ASCII digits))`, per the login handshake.
#[must_use]
pub fn client_authenticator(client_id: &str, secret: &str, timestamp: u32) -> [u8; 16] {
    let mut buf = Vec::with_capacity(8 + 7 + secret.len() + 10);
    write_fixed_bytes(&mut buf, client_id.as_bytes(), 8);
    buf.extend_from_slice(&[0u8; 7]);
    buf.extend_from_slice(secret.as_bytes());
    buf.extend_from_slice(format!("{timestamp:010}").as_bytes());

    let mut hasher = Md5::new();
    hasher.update(&buf);
    hasher.finalize().into()
}

/// Compute `AuthenticatorServer = MD5(Status(1) || AuthenticatorClient(16)
/// || Secret)`, the server's half of the handshake.
#[must_use]
pub fn server_authenticator(status: u32, authenticator_client: &[u8; 16], secret: &str) -> [u8; 16] {
    let mut buf = Vec::with_capacity(1 + 16 + secret.len());
    #[allow(clippy::cast_possible_truncation)]
    buf.push(status as u8);
    buf.extend_from_slice(authenticator_client);
    buf.extend_from_slice(secret.as_bytes());

    let mut hasher = Md5::new();
    hasher.update(&buf);
    hasher.finalize().into()
}

/// Source of wall-clock time, injectable so timestamp-dependent code is
/// testable without a real clock.
pub trait Clock: Send + Sync {
    /// Current local time.
    fn now_local(&self) -> chrono::DateTime<chrono::Local>;
}

/// `Clock` backed by the operating system's clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> chrono::DateTime<chrono::Local> {
        chrono::Local::now()
    }
}

/// Format a timestamp as `MMDDhhmmss` packed into a `u32` (e.g. `0729143522`
/// for July 29th, 14:35:22), the form used by `Login.timestamp` and
/// `GenMsgID`'s date component.
#[must_use]
pub fn format_timestamp(clock: &dyn Clock) -> u32 {
    let now = clock.now_local();
    let s = format!(
        "{:02}{:02}{:02}{:02}{:02}",
        now.format("%m").to_string().parse::<u32>().unwrap_or(0),
        now.format("%d").to_string().parse::<u32>().unwrap_or(0),
        now.format("%H").to_string().parse::<u32>().unwrap_or(0),
        now.format("%M").to_string().parse::<u32>().unwrap_or(0),
        now.format("%S").to_string().parse::<u32>().unwrap_or(0),
    );
    s.parse().unwrap_or(0)
}

/// Pack a `MsgID`: a 20-hex-char value encoding the sending SP's id, the
/// current month/day/hour/minute, and a per-minute sequence number, as
/// `spid(24 bits) | month(8) | day(8) | hour(8) | minute(8) | seq(24 bits)`.
#[must_use]
pub fn pack_msg_id(sp_id: u32, clock: &dyn Clock, seq_num: u32) -> String {
    let now = clock.now_local();
    let mut bits: u128 = 0;
    bits |= u128::from(sp_id & 0x00FF_FFFF) << 56;
    bits |= u128::from(now.format("%m").to_string().parse::<u8>().unwrap_or(0)) << 48;
    bits |= u128::from(now.format("%d").to_string().parse::<u8>().unwrap_or(0)) << 40;
    bits |= u128::from(now.format("%H").to_string().parse::<u8>().unwrap_or(0)) << 32;
    bits |= u128::from(now.format("%M").to_string().parse::<u8>().unwrap_or(0)) << 24;
    bits |= u128::from(seq_num & 0x00FF_FFFF);

    let bytes: [u8; 10] = (bits << 48u32).to_be_bytes()[0..10]
        .try_into()
        .unwrap_or([0; 10]);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Reverse [`pack_msg_id`], splitting the 20-hex-char id back into its
/// fields.
pub struct MsgId {
    /// 24-bit SP id.
    pub sp_id: u32,
    /// Month (1-12).
    pub month: u8,
    /// Day of month.
    pub day: u8,
    /// Hour (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
    /// Per-minute sequence number.
    pub seq_num: u32,
}

/// Parse a 20-hex-char `MsgID` string into its component fields.
pub fn unpack_msg_id(s: &str) -> Result<MsgId, ProtocolError> {
    if s.len() != 20 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ProtocolError::InvalidMsgId(s.to_string()));
    }
    let raw = hex_decode(s)?;
    let mut bytes = [0u8; 16];
    bytes[0..10].copy_from_slice(&raw);
    let bits = u128::from_be_bytes(bytes) >> 48;

    Ok(MsgId {
        sp_id: ((bits >> 56) & 0x00FF_FFFF) as u32,
        month: ((bits >> 48) & 0xFF) as u8,
        day: ((bits >> 40) & 0xFF) as u8,
        hour: ((bits >> 32) & 0xFF) as u8,
        minute: ((bits >> 24) & 0xFF) as u8,
        seq_num: (bits & 0x00FF_FFFF) as u32,
    })
}

fn hex_decode(s: &str) -> Result<Vec<u8>, ProtocolError> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() / 2);
    for chunk in bytes.chunks_exact(2) {
        let hi = (chunk[0] as char)
            .to_digit(16)
            .ok_or_else(|| ProtocolError::InvalidMsgId(s.to_string()))?;
        let lo = (chunk[1] as char)
            .to_digit(16)
            .ok_or_else(|| ProtocolError::InvalidMsgId(s.to_string()))?;
        #[allow(clippy::cast_possible_truncation)]
        out.push(((hi << 4) | lo) as u8);
    }
    Ok(out)
}

/// Process-wide counter for the UDH reference byte, wrapping modulo 256.
static UDH_REF: core::sync::atomic::AtomicU8 = core::sync::atomic::AtomicU8::new(0);

/// Next UDH concatenation reference byte.
pub fn next_udh_ref() -> u8 {
    UDH_REF.fetch_add(1, core::sync::atomic::Ordering::Relaxed)
}

/// Split `content` into segments no larger than `max_segment_bytes`,
/// prefixing each with the 6-byte concatenated-SMS user data header
/// (`0x05 0x00 0x03 ref total seq`) when more than one segment results.
#[must_use]
pub fn split_long_sms(content: &[u8], max_segment_bytes: usize) -> Vec<Vec<u8>> {
    if content.len() <= max_segment_bytes {
        return vec![content.to_vec()];
    }
    let udh_len = 6;
    let payload_cap = max_segment_bytes.saturating_sub(udh_len).max(1);
    let chunks: Vec<&[u8]> = content.chunks(payload_cap).collect();
    #[allow(clippy::cast_possible_truncation)]
    let total = chunks.len() as u8;
    let reference = next_udh_ref();

    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            #[allow(clippy::cast_possible_truncation)]
            let seq = (i + 1) as u8;
            let mut segment = Vec::with_capacity(udh_len + chunk.len());
            segment.extend_from_slice(&[0x05, 0x00, 0x03, reference, total, seq]);
            segment.extend_from_slice(chunk);
            segment
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct FixedClock(chrono::DateTime<chrono::Local>);
    impl Clock for FixedClock {
        fn now_local(&self) -> chrono::DateTime<chrono::Local> {
            self.0
        }
    }

    #[test]
    fn ucs2_round_trips_mixed_text() {
        let original = "Hello, 世界!";
        let encoded = utf8_to_ucs2(original);
        assert_eq!(ucs2_to_utf8(&encoded).unwrap(), original);
    }

    #[test]
    fn gb18030_round_trips_chinese_text() {
        let original = "短信网关";
        let encoded = utf8_to_gb18030(original);
        assert_eq!(gb18030_to_utf8(&encoded).unwrap(), original);
    }

    #[test]
    fn client_authenticator_is_deterministic() {
        let a = client_authenticator("10000001", "12345678", 301_000_000);
        let b = client_authenticator("10000001", "12345678", 301_000_000);
        assert_eq!(a, b);

        let hex: String = a.iter().map(|b| format!("{b:02x}")).collect();
        assert_eq!(hex, "9ac2c05399bafaabce611f515277648e");
    }

    #[test]
    fn msg_id_round_trips() {
        use chrono::TimeZone;
        let clock = FixedClock(
            chrono::Local
                .with_ymd_and_hms(2026, 7, 29, 14, 35, 0)
                .unwrap(),
        );
        let id = pack_msg_id(0x0010_0001, &clock, 42);
        assert_eq!(id.len(), 20);

        let parsed = unpack_msg_id(&id).unwrap();
        assert_eq!(parsed.sp_id, 0x0010_0001);
        assert_eq!(parsed.month, 7);
        assert_eq!(parsed.day, 29);
        assert_eq!(parsed.hour, 14);
        assert_eq!(parsed.minute, 35);
        assert_eq!(parsed.seq_num, 42);
    }

    #[test]
    fn split_long_sms_adds_udh_only_when_needed() {
        let short = b"hello";
        assert_eq!(split_long_sms(short, 140), vec![short.to_vec()]);

        let long = vec![b'x'; 300];
        let segments = split_long_sms(&long, 140);
        assert!(segments.len() > 1);
        for seg in &segments {
            assert_eq!(&seg[0..3], &[0x05, 0x00, 0x03]);
        }
    }
}
