//! Codec-layer error type.

use thiserror::Error;

/// Errors produced while reading or writing framed SMGP packets over a
/// transport.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The peer closed the connection (EOF on a header read).
    #[error("connection closed by peer")]
    ConnectionClosed,

    /// A read did not complete before its deadline.
    #[error("read timed out")]
    ReadTimeout,

    /// Underlying transport I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The frame failed to decode as a valid SMGP packet.
    #[error(transparent)]
    Protocol(#[from] smgp_protocol::ProtocolError),

    /// The connection was already closed when an operation was attempted.
    #[error("connection is closed")]
    AlreadyClosed,
}
