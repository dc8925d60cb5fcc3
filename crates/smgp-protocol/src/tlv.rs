//! TLV options: the variable-length tail carried by `Submit`, `Deliver`,
//! and their responses.
//!
//! Every option is `tag(u16 BE) | length(u16 BE) | value(length bytes)`.
//! The reference implementation's encoder inconsistently packed some tags
//! as a single byte; this implementation always writes the full 2-byte tag.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::ProtocolError;
use crate::prelude::*;

/// Recognized option tags. Unrecognized tags round-trip via
/// [`Tag::Unknown`] rather than being rejected, since options are meant to
/// be extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    /// `TP_pid`: transport protocol id, forwarded from/to the SMSC peer.
    TpPid,
    /// `TP_udhi`: whether `MsgContent` begins with a user data header.
    TpUdhi,
    /// `LinkID`: groups a batch of related submits for billing/routing.
    LinkId,
    /// `ChargeUserType`: how the charged party is identified.
    ChargeUserType,
    /// `ChargeTermType`: type of the charged terminal id.
    ChargeTermType,
    /// `ChargeTermPseudo`: charged terminal pseudo id.
    ChargeTermPseudo,
    /// `DestTermType`: type of the destination terminal id.
    DestTermType,
    /// `DestTermPseudo`: destination terminal pseudo id.
    DestTermPseudo,
    /// `PkTotal`: total number of segments in a concatenated message.
    PkTotal,
    /// `PkNumber`: this segment's 1-based position.
    PkNumber,
    /// `SubmitMsgType`: submit sub-type (notification, etc).
    SubmitMsgType,
    /// `SPDealResult`: SP-side handling result.
    SpDealResult,
    /// `SrcTermType`: type of the source terminal id.
    SrcTermType,
    /// `SrcTermPseudo`: source terminal pseudo id.
    SrcTermPseudo,
    /// `NodesCount`: number of SMSC nodes the message traversed.
    NodesCount,
    /// `MsgSrc`: originating source number for the message.
    MsgSrc,
    /// `SrcType`: how `MsgSrc` should be interpreted.
    SrcType,
    /// `MServiceID`: marketing service id, distinct from `ServiceID`.
    MServiceId,
    /// Any tag not in the table above.
    Unknown(u16),
}

impl Tag {
    /// Decode a raw tag value.
    #[must_use]
    pub const fn from_u16(value: u16) -> Self {
        match value {
            0x0001 => Self::TpPid,
            0x0002 => Self::TpUdhi,
            0x0003 => Self::LinkId,
            0x0004 => Self::ChargeUserType,
            0x0005 => Self::ChargeTermType,
            0x0006 => Self::ChargeTermPseudo,
            0x0007 => Self::DestTermType,
            0x0008 => Self::DestTermPseudo,
            0x0009 => Self::PkTotal,
            0x000A => Self::PkNumber,
            0x000B => Self::SubmitMsgType,
            0x000C => Self::SpDealResult,
            0x000D => Self::SrcTermType,
            0x000E => Self::SrcTermPseudo,
            0x000F => Self::NodesCount,
            0x0010 => Self::MsgSrc,
            0x0011 => Self::SrcType,
            0x0012 => Self::MServiceId,
            other => Self::Unknown(other),
        }
    }

    /// Encode back to the raw wire value.
    #[must_use]
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::TpPid => 0x0001,
            Self::TpUdhi => 0x0002,
            Self::LinkId => 0x0003,
            Self::ChargeUserType => 0x0004,
            Self::ChargeTermType => 0x0005,
            Self::ChargeTermPseudo => 0x0006,
            Self::DestTermType => 0x0007,
            Self::DestTermPseudo => 0x0008,
            Self::PkTotal => 0x0009,
            Self::PkNumber => 0x000A,
            Self::SubmitMsgType => 0x000B,
            Self::SpDealResult => 0x000C,
            Self::SrcTermType => 0x000D,
            Self::SrcTermPseudo => 0x000E,
            Self::NodesCount => 0x000F,
            Self::MsgSrc => 0x0010,
            Self::SrcType => 0x0011,
            Self::MServiceId => 0x0012,
            Self::Unknown(v) => v,
        }
    }
}

/// The set of TLV options attached to a packet, keyed by tag.
///
/// Stored in a `BTreeMap` so encoding is deterministic (useful for
/// round-trip tests) even though the protocol does not mandate option
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(crate::prelude::BTreeMap<u16, Bytes>);

impl Options {
    /// An empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self(crate::prelude::BTreeMap::new())
    }

    /// Insert or replace an option's value.
    pub fn insert(&mut self, tag: Tag, value: impl Into<Bytes>) {
        self.0.insert(tag.to_u16(), value.into());
    }

    /// Fetch an option's raw value, if present.
    #[must_use]
    pub fn get(&self, tag: Tag) -> Option<&Bytes> {
        self.0.get(&tag.to_u16())
    }

    /// Number of options present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no options are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total encoded length of all options (4-byte tag+length prefix, per
    /// option, plus each value's length) — the quantity `Submit`/`Deliver`
    /// fold into their `PacketLength`.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.0.values().map(|v| 4 + v.len()).sum()
    }

    /// Encode all options in tag order.
    pub fn encode(&self, dst: &mut impl BufMut) {
        for (&tag, value) in &self.0 {
            dst.put_u16(tag);
            #[allow(clippy::cast_possible_truncation)]
            dst.put_u16(value.len() as u16);
            dst.put_slice(value);
        }
    }

    /// Parse a run of TLV options from the remainder of a packet body.
    pub fn decode(src: &mut impl Buf) -> Result<Self, ProtocolError> {
        let mut map = crate::prelude::BTreeMap::new();
        while src.has_remaining() {
            if src.remaining() < 4 {
                return Err(ProtocolError::TruncatedOption {
                    tag: 0,
                    needed: 4,
                    available: src.remaining(),
                });
            }
            let tag = src.get_u16();
            let len = src.get_u16() as usize;
            if src.remaining() < len {
                return Err(ProtocolError::TruncatedOption {
                    tag,
                    needed: len,
                    available: src.remaining(),
                });
            }
            let mut value = BytesMut::with_capacity(len);
            value.resize(len, 0);
            src.copy_to_slice(&mut value);
            map.insert(tag, value.freeze());
        }
        Ok(Self(map))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_encode_decode() {
        let mut opts = Options::new();
        opts.insert(Tag::TpUdhi, Bytes::from_static(&[1]));
        opts.insert(Tag::PkTotal, Bytes::from_static(&[3]));

        let mut buf = BytesMut::new();
        opts.encode(&mut buf);
        assert_eq!(buf.len(), opts.encoded_len());

        let mut cursor = buf.freeze();
        let decoded = Options::decode(&mut cursor).unwrap();
        assert_eq!(decoded, opts);
    }

    #[test]
    fn unknown_tag_round_trips() {
        let tag = Tag::from_u16(0xBEEF);
        assert_eq!(tag, Tag::Unknown(0xBEEF));
        assert_eq!(tag.to_u16(), 0xBEEF);
    }

    #[test]
    fn truncated_value_is_an_error() {
        let mut buf = BytesMut::new();
        buf.put_u16(Tag::LinkId.to_u16());
        buf.put_u16(10); // claims 10 bytes, provides none
        let mut cursor = buf.freeze();
        assert!(Options::decode(&mut cursor).is_err());
    }
}
