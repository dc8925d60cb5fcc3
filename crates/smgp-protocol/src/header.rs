//! SMGP packet header: the 12-byte prefix on every frame.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::ProtocolError;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 12;

/// Smallest legal `PacketLength` (header only, no body — used only by
/// `ActiveTest`/`ActiveTestResp`/`ExitResp` which carry no fields).
pub const PACKET_LENGTH_MIN: u32 = HEADER_SIZE as u32;

/// Largest `PacketLength` this implementation will accept. The protocol
/// does not mandate a bound; this is the deployment ceiling.
pub const PACKET_LENGTH_MAX: u32 = 65_535;

/// Known `RequestID` values, split into request (`0x0000_000x`) and
/// response (`0x8000_000x`) ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RequestId {
    /// `Login` request.
    Login = 0x0000_0001,
    /// `Login` response.
    LoginResp = 0x8000_0001,
    /// `Submit` request.
    Submit = 0x0000_0002,
    /// `Submit` response.
    SubmitResp = 0x8000_0002,
    /// `Deliver` request.
    Deliver = 0x0000_0003,
    /// `Deliver` response.
    DeliverResp = 0x8000_0003,
    /// `ActiveTest` request (keep-alive probe).
    ActiveTest = 0x0000_0004,
    /// `ActiveTest` response.
    ActiveTestResp = 0x8000_0004,
    /// `Exit` request (graceful teardown).
    Exit = 0x0000_0006,
    /// `Exit` response.
    ExitResp = 0x8000_0006,
    /// `Query` request.
    Query = 0x0000_0007,
    /// `Query` response.
    QueryResp = 0x8000_0007,
}

impl RequestId {
    /// Resolve a raw `RequestID` to a known variant.
    pub fn from_u32(value: u32) -> Result<Self, ProtocolError> {
        match value {
            0x0000_0001 => Ok(Self::Login),
            0x8000_0001 => Ok(Self::LoginResp),
            0x0000_0002 => Ok(Self::Submit),
            0x8000_0002 => Ok(Self::SubmitResp),
            0x0000_0003 => Ok(Self::Deliver),
            0x8000_0003 => Ok(Self::DeliverResp),
            0x0000_0004 => Ok(Self::ActiveTest),
            0x8000_0004 => Ok(Self::ActiveTestResp),
            0x0000_0006 => Ok(Self::Exit),
            0x8000_0006 => Ok(Self::ExitResp),
            0x0000_0007 => Ok(Self::Query),
            0x8000_0007 => Ok(Self::QueryResp),
            other => Err(ProtocolError::UnknownRequestId(other)),
        }
    }

    /// Whether this is a response (high bit set).
    #[must_use]
    pub const fn is_response(self) -> bool {
        (self as u32) & 0x8000_0000 != 0
    }
}

/// The 12-byte header present on every SMGP frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Total frame length, including this header, in bytes.
    pub packet_length: u32,
    /// Which packet variant follows.
    pub request_id: u32,
    /// Connection-scoped correlation id; a response echoes its request's.
    pub sequence_id: u32,
}

impl Header {
    /// Build a header for a fresh packet; `packet_length` is filled in by
    /// the caller once the body is known.
    #[must_use]
    pub const fn new(request_id: u32, sequence_id: u32) -> Self {
        Self {
            packet_length: HEADER_SIZE as u32,
            request_id,
            sequence_id,
        }
    }

    /// Decode a header from an already-buffered 12-byte slice.
    pub fn decode(src: &mut impl Buf) -> Result<Self, ProtocolError> {
        if src.remaining() < HEADER_SIZE {
            return Err(ProtocolError::IncompletePacket {
                expected: HEADER_SIZE,
                actual: src.remaining(),
            });
        }
        let packet_length = src.get_u32();
        let request_id = src.get_u32();
        let sequence_id = src.get_u32();
        Ok(Self {
            packet_length,
            request_id,
            sequence_id,
        })
    }

    /// Encode the header.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_u32(self.packet_length);
        dst.put_u32(self.request_id);
        dst.put_u32(self.sequence_id);
    }

    /// Encode to a standalone buffer.
    #[must_use]
    pub fn encode_to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(HEADER_SIZE);
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Body length implied by `packet_length` (never underflows).
    #[must_use]
    pub const fn body_length(&self) -> usize {
        self.packet_length.saturating_sub(HEADER_SIZE as u32) as usize
    }

    /// Validate `packet_length` against the configured ceiling.
    pub fn check_length(&self, max: u32) -> Result<(), ProtocolError> {
        if self.packet_length < PACKET_LENGTH_MIN || self.packet_length > max {
            return Err(ProtocolError::InvalidPacketLength(self.packet_length));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn header_roundtrip() {
        let header = Header {
            packet_length: 139,
            request_id: RequestId::Submit as u32,
            sequence_id: 7,
        };
        let bytes = header.encode_to_bytes();
        assert_eq!(bytes.len(), HEADER_SIZE);

        let mut cursor = bytes.as_ref();
        let decoded = Header::decode(&mut cursor).unwrap();
        assert_eq!(header, decoded);
    }

    #[test]
    fn body_length_never_underflows() {
        let header = Header::new(RequestId::ActiveTest as u32, 1);
        assert_eq!(header.body_length(), 0);
    }

    #[test]
    fn request_id_ranges() {
        assert!(!RequestId::Submit.is_response());
        assert!(RequestId::SubmitResp.is_response());
        assert_eq!(RequestId::from_u32(0x0000_0002).unwrap(), RequestId::Submit);
        assert!(RequestId::from_u32(0xffff_ffff).is_err());
    }

    #[test]
    fn exit_request_id_is_distinct_from_active_test() {
        // Regression guard: the reference implementation once packed Exit
        // frames with ActiveTest's request id.
        assert_ne!(RequestId::Exit as u32, RequestId::ActiveTest as u32);
        assert_ne!(RequestId::ExitResp as u32, RequestId::ActiveTestResp as u32);
    }
}
