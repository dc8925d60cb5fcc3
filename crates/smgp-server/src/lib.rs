//! # smgp-server
//!
//! Async SMGP v3.0 server: a TCP accept loop with exponential backoff on
//! transient errors, a per-connection session loop that keeps the link
//! alive with a ticking `ActiveTest` scheduler, and a pluggable chain of
//! [`Handler`]s for dispatching `Login`, `Submit`, `Deliver`, and `Query`
//! traffic.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use smgp_protocol::Packet;
//! use smgp_server::{Error, Handler, Request, Response, Server, ServerConfig};
//!
//! struct EchoLogin;
//!
//! #[async_trait]
//! impl Handler for EchoLogin {
//!     async fn serve(&self, resp: &mut Response, req: &Request) -> Result<bool, Error> {
//!         if matches!(req.packet, Packet::Login(_)) {
//!             // Accept every login; a real handler would verify the
//!             // authenticator digest here.
//!             return Ok(false);
//!         }
//!         Ok(true)
//!     }
//! }
//!
//! # async fn run() -> Result<(), Error> {
//! let config = ServerConfig::new("0.0.0.0", 9000);
//! let server = Server::new(config, vec![Box::new(EchoLogin)])?;
//! server.listen_and_serve().await
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod conn;
pub mod error;
pub mod handler;
pub mod server;

pub use config::{build_report_deliver, ServerConfig};
pub use conn::ServerConn;
pub use error::{Error, Result};
pub use handler::{response_skeleton, Handler, HandlerChain, Request, Response};
pub use server::Server;
