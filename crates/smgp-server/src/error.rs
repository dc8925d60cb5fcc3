//! Server error types.

use thiserror::Error;

/// Errors that can occur while running an SMGP server.
#[derive(Debug, Error)]
pub enum Error {
    /// [`crate::ServerConfig`] did not specify a bind address.
    #[error("smgp server listen: empty server addr")]
    EmptyServerAddr,

    /// A server was built with an empty [`crate::handler::HandlerChain`].
    #[error("smgp server: no connection handler")]
    NoHandlers,

    /// The peer's `Login.client_version` did not match the server's
    /// configured protocol version.
    #[error("smgp server read packet: receive a unsupported version")]
    UnsupportedVersion,

    /// Codec-layer failure (framing, timeout, I/O).
    #[error("codec error: {0}")]
    Codec(#[from] smgp_codec::CodecError),

    /// Wire-format decode/encode failure.
    #[error("protocol error: {0}")]
    Protocol(#[from] smgp_protocol::ProtocolError),

    /// Underlying I/O failure (listener accept, socket configuration).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A handler returned an application-level failure.
    #[error("handler error: {0}")]
    Handler(String),
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;
