//! # smgp-codec
//!
//! Async connection layer over [`smgp_protocol`]'s wire format.
//!
//! This crate turns a plain `AsyncRead + AsyncWrite` transport into a
//! frame-at-a-time SMGP connection: it reads a 12-byte header, pulls exactly
//! `PacketLength - 12` more bytes for the body, and decodes the result into a
//! [`smgp_protocol::Packet`]. Each `PacketLength` is self-describing, so
//! there is no cross-packet message reassembly here — one frame is one
//! logical request or response.
//!
//! ## Architecture
//!
//! ```text
//! TCP stream → Connection::recv (header + body read_exact) → Packet
//! ```
//!
//! ### Write serialization
//!
//! The connection splits its transport into read and write halves. The read
//! half stays with the owning `Connection`; the write half is wrapped in an
//! `Arc<Mutex<_>>` and handed out via [`connection::Sender`] so the session
//! loop, a request handler, and the active-test scheduler can all send whole
//! frames without interleaving bytes on the wire.
//!
//! ```rust,ignore
//! use smgp_codec::Connection;
//!
//! let mut conn = Connection::new(tcp_stream);
//! let sender = conn.sender();
//!
//! tokio::spawn(async move {
//!     sender.send(&Packet::ActiveTest, 1).await
//! });
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod connection;
pub mod error;
pub mod pool;
pub mod sequence;
pub mod state;

pub use connection::{Connection, Frame, Sender};
pub use error::CodecError;
pub use pool::{BufferPool, Lease};
pub use sequence::SequenceSource;
pub use state::{ConnectionState, StateCell};
