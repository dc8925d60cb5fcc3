//! SMGP protocol version and field-value constants.

/// SMGP protocol version this crate implements (v3.0).
pub const VERSION: u8 = 0x30;

/// Login mode, carried in `Login.login_mode` and negotiated at connect time.
///
/// The numbering below follows the reference implementation, which differs
/// from some prose descriptions of the protocol that swap `Send` and
/// `Transmit` — see `DESIGN.md` for the resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LoginMode {
    /// Send-only: the peer may submit messages but not receive deliveries.
    Send = 0,
    /// Receive-only: the peer receives deliveries but may not submit.
    Receive = 1,
    /// Transmit: the peer may both submit and receive.
    Transmit = 2,
}

impl LoginMode {
    /// Decode a login mode from its wire byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Send),
            1 => Some(Self::Receive),
            2 => Some(Self::Transmit),
            _ => None,
        }
    }
}

/// `MsgType`, carried in `Submit`/`Deliver`: direction of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MsgType {
    /// Mobile-originated.
    Mo = 0,
    /// Mobile-terminated.
    Mt = 6,
}

/// `MsgFormat`: encoding of `MsgContent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MsgFormat {
    /// 7-bit ASCII.
    Ascii = 0,
    /// 8-bit binary, application-defined.
    Binary = 4,
    /// UCS-2 (UTF-16 big-endian).
    Ucs2 = 8,
    /// GB18030 (simplified Chinese).
    Gb18030 = 15,
}

impl MsgFormat {
    /// Decode a message format from its wire byte, if recognized.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Ascii),
            4 => Some(Self::Binary),
            8 => Some(Self::Ucs2),
            15 => Some(Self::Gb18030),
            _ => None,
        }
    }
}

/// Whether a submit requests a delivery report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NeedReport {
    /// No delivery report requested.
    No = 0,
    /// Delivery report requested.
    Yes = 1,
}

/// Whether a delivered message is itself a delivery report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IsReport {
    /// Ordinary mobile-terminated content.
    No = 0,
    /// The `MsgContent` carries a delivery report.
    Yes = 1,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn login_mode_round_trips_known_values() {
        assert_eq!(LoginMode::from_u8(0), Some(LoginMode::Send));
        assert_eq!(LoginMode::from_u8(1), Some(LoginMode::Receive));
        assert_eq!(LoginMode::from_u8(2), Some(LoginMode::Transmit));
        assert_eq!(LoginMode::from_u8(3), None);
    }

    #[test]
    fn msg_format_round_trips_known_values() {
        assert_eq!(MsgFormat::from_u8(8), Some(MsgFormat::Ucs2));
        assert_eq!(MsgFormat::from_u8(15), Some(MsgFormat::Gb18030));
        assert_eq!(MsgFormat::from_u8(1), None);
    }
}
