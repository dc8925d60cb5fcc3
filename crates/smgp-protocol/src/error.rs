//! Protocol-level error type.

use thiserror::Error;

/// Errors produced while decoding or encoding SMGP wire data.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Buffer held fewer bytes than a fixed-size field required.
    #[error("incomplete packet: expected at least {expected} bytes, got {actual}")]
    IncompletePacket {
        /// Bytes required to decode the field.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// `PacketLength` fell outside `[SMGP_PACKET_MIN, SMGP_PACKET_MAX]`.
    #[error("packet length {0} out of bounds")]
    InvalidPacketLength(u32),

    /// `RequestID` did not match any known request or response range.
    #[error("unrecognized request id: {0:#010x}")]
    UnknownRequestId(u32),

    /// A TLV option's declared length ran past the end of the buffer.
    #[error("truncated TLV option (tag {tag:#06x}): need {needed} bytes, have {available}")]
    TruncatedOption {
        /// The tag of the offending option.
        tag: u16,
        /// Bytes the option's length field claimed.
        needed: usize,
        /// Bytes actually remaining.
        available: usize,
    },

    /// A fixed-length octet string field was not valid UTF-8 after trimming
    /// its zero padding.
    #[error("invalid octet string: {0}")]
    InvalidOctetString(String),

    /// A UCS-2 or GB18030 byte sequence could not be transcoded.
    #[error("invalid text encoding: {0}")]
    InvalidEncoding(String),

    /// A hex-encoded `MsgID` did not have the expected 20-character form.
    #[error("malformed message id: {0}")]
    InvalidMsgId(String),

    /// Trailing bytes remained after decoding a packet body.
    #[error("trailing bytes after decode: {0} unread")]
    TrailingBytes(usize),
}
