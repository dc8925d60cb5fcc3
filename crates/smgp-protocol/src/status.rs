//! Result/status codes carried in response packets.

use core::fmt;

/// A response status code. Named constants cover the values the protocol
/// defines; anything else decodes to [`Status::OTHER`] rather than erroring,
/// since new status values are additive from a wire-compatibility
/// standpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(u32);

impl Status {
    /// Success.
    pub const OK: Self = Self(0);
    /// Message structure error.
    pub const INVALID_STRUCTURE: Self = Self(10);
    /// Unknown or unsupported command id.
    pub const INVALID_COMMAND_ID: Self = Self(11);
    /// Sequence id out of order or already used.
    pub const SEQUENCE_ID_ERROR: Self = Self(12);
    /// Declared message length did not match the content.
    pub const MSG_LENGTH_ERROR: Self = Self(13);
    /// Unknown fee code.
    pub const FEE_CODE_ERROR: Self = Self(14);
    /// Unknown service id.
    pub const SERVICE_ID_ERROR: Self = Self(15);
    /// Invalid fixed-fee value.
    pub const FIXED_FEE_ERROR: Self = Self(16);
    /// Invalid source terminal id.
    pub const SRC_TERM_INVALID: Self = Self(17);
    /// Invalid destination terminal id.
    pub const DEST_TERM_INVALID: Self = Self(18);
    /// Invalid message format.
    pub const MSG_FORMAT_ERROR: Self = Self(19);
    /// Invalid fee type.
    pub const FEE_TYPE_ERROR: Self = Self(20);
    /// Authentication failed (bad client id or authenticator mismatch).
    pub const AUTH_ERROR: Self = Self(21);
    /// Peer requested a protocol version we do not support.
    pub const VERSION_TOO_HIGH: Self = Self(22);
    /// Sender is over its configured traffic limit.
    pub const TRAFFIC_RESTRICTED: Self = Self(23);

    /// Wrap a raw status value, named or not.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw wire value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Whether this status indicates success.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::OK => "OK",
            Self::INVALID_STRUCTURE => "InvalidStructure",
            Self::INVALID_COMMAND_ID => "InvalidCommandId",
            Self::SEQUENCE_ID_ERROR => "SequenceIdError",
            Self::MSG_LENGTH_ERROR => "MsgLengthError",
            Self::FEE_CODE_ERROR => "FeeCodeError",
            Self::SERVICE_ID_ERROR => "ServiceIdError",
            Self::FIXED_FEE_ERROR => "FixedFeeError",
            Self::SRC_TERM_INVALID => "SrcTermInvalid",
            Self::DEST_TERM_INVALID => "DestTermInvalid",
            Self::MSG_FORMAT_ERROR => "MsgFormatError",
            Self::FEE_TYPE_ERROR => "FeeTypeError",
            Self::AUTH_ERROR => "AuthError",
            Self::VERSION_TOO_HIGH => "VersionTooHigh",
            Self::TRAFFIC_RESTRICTED => "TrafficRestricted",
            _ => return write!(f, "Status({})", self.0),
        };
        f.write_str(name)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Status {}

impl From<u32> for Status {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Status> for u32 {
    fn from(status: Status) -> Self {
        status.0
    }
}
