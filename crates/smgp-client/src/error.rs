//! Client error types.

use smgp_protocol::Status;
use thiserror::Error;

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The gateway rejected `Login` with a non-OK status.
    #[error("login rejected: {0}")]
    LoginRejected(Status),

    /// `LoginResp.authenticator_server` did not match the digest we computed
    /// locally; the gateway may not hold the same shared secret.
    #[error("server authenticator mismatch")]
    ServerAuthMismatch,

    /// The connection closed before the expected response arrived.
    #[error("connection closed")]
    ConnectionClosed,

    /// A frame arrived that was not the response we were waiting for.
    #[error("unexpected response: expected {expected:?}, got {got:?}")]
    UnexpectedResponse {
        /// The request id we expected a response to.
        expected: smgp_protocol::RequestId,
        /// The request id we actually received.
        got: smgp_protocol::RequestId,
    },

    /// Codec-layer failure (framing, timeout, I/O).
    #[error("codec error: {0}")]
    Codec(#[from] smgp_codec::CodecError),

    /// Wire-format decode/encode failure.
    #[error("protocol error: {0}")]
    Protocol(#[from] smgp_protocol::ProtocolError),

    /// TCP connect did not complete before the configured deadline.
    #[error("connect timed out")]
    ConnectTimeout,

    /// `Login`/`LoginResp` did not complete before the configured deadline.
    #[error("login timed out")]
    LoginTimeout,

    /// Underlying I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_rejected_displays_status_name() {
        let err = Error::LoginRejected(Status::AUTH_ERROR);
        assert!(err.to_string().contains("login rejected"));
    }
}
