//! # smgp-client
//!
//! Async SMGP v3.0 client: connects to an SMSC gateway, completes the
//! `Login` handshake, and exposes `Submit`/`Query`/`ActiveTest` request
//! pairs plus a `recv` for unsolicited `Deliver` traffic.
//!
//! This is the primary user-facing API for sending and receiving short
//! messages as a service provider. It is built on [`smgp_codec`] for
//! framing and [`smgp_protocol`] for the wire format.
//!
//! ## Example
//!
//! ```rust,no_run
//! use smgp_client::{Client, ClientConfig, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new(
//!         "smsc.example.com",
//!         9000,
//!         Credentials::new("10000001", "shared-secret"),
//!     );
//!
//!     let mut client = Client::connect(config).await?;
//!
//!     let frame = client.recv().await?;
//!     println!("received frame: {:?}", frame.header.request_id);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;

pub use client::Client;
pub use config::{ClientConfig, Credentials, TimeoutConfig};
pub use error::{Error, Result};
