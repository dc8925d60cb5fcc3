//! # smgp-testing
//!
//! Test infrastructure for SMGP gateway development: a mock server for
//! driving a real [`smgp_client::Client`] against canned responses, and
//! packet fixture builders for [`smgp_server`] handler tests.
//!
//! ## Features
//!
//! - Mock SMGP server for unit tests (no real gateway required)
//! - Inbound frame recording for assertions
//! - Packet fixture builders (`Login`/`Submit`/`Deliver`)
//!
//! ## Mock Server Example
//!
//! ```rust,ignore
//! use smgp_testing::mock_server::MockSmgpServer;
//!
//! #[tokio::test]
//! async fn test_with_mock_server() {
//!     let server = MockSmgpServer::builder().build().await.unwrap();
//!     let addr = server.addr();
//!     // Connect a `smgp_client::Client` to addr...
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod fixtures;
pub mod mock_server;

pub use fixtures::{deliver_fixture, login_fixture, submit_fixture};
pub use mock_server::{
    MockServerBuilder, MockServerConfig, MockServerError, MockSmgpServer, PacketRecorder,
    RecordedPacket,
};
