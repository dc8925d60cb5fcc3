//! Mock SMGP server for unit testing.
//!
//! This module provides a configurable SMGP peer built on top of
//! [`smgp_server`], so tests can drive a real [`smgp_client::Client`]
//! against canned responses without a production gateway.
//!
//! ## Example
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

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use smgp_protocol::{Header, Packet, QueryCounters, Status, SystemClock};
use smgp_server::{Error as ServerError, Handler, Request, Response, Server, ServerConfig};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Error type for mock server operations.
#[derive(Debug, Error)]
pub enum MockServerError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server construction failed.
    #[error("server error: {0}")]
    Server(#[from] ServerError),
}

/// Result type for mock server operations.
pub type Result<T> = std::result::Result<T, MockServerError>;

/// A frame the mock server received, kept for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPacket {
    /// The frame's header.
    pub header: Header,
    /// The decoded packet body.
    pub packet: Packet,
}

/// Shared, cloneable log of every frame the mock server has received.
#[derive(Clone, Default)]
pub struct PacketRecorder {
    inner: Arc<Mutex<Vec<RecordedPacket>>>,
}

impl PacketRecorder {
    fn record(&self, header: Header, packet: Packet) {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(RecordedPacket { header, packet });
    }

    /// Snapshot of every frame recorded so far, oldest first.
    #[must_use]
    pub fn recorded(&self) -> Vec<RecordedPacket> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

/// Canned behavior for a [`MockSmgpServer`].
#[derive(Debug, Clone)]
pub struct MockServerConfig {
    /// Whether `Login` should succeed regardless of the supplied
    /// authenticator. When `false`, every login is rejected with
    /// [`Status::AUTH_ERROR`].
    pub accept_logins: bool,
    /// `SubmitResp.status` returned for every `Submit`.
    pub submit_status: Status,
    /// `QueryResp.counters` returned for every `Query`.
    pub query_counters: QueryCounters,
    /// Shared secret used to compute `LoginResp.authenticator_server`. Must
    /// match the secret a connecting [`smgp_client::Client`] was configured
    /// with, or its own mismatch check will reject the handshake.
    pub secret: String,
}

impl Default for MockServerConfig {
    fn default() -> Self {
        Self {
            accept_logins: true,
            submit_status: Status::OK,
            secret: "secret".to_string(),
            query_counters: QueryCounters {
                mt_tl_msg: 0,
                mt_tl_usr: 0,
                mt_scs: 0,
                mt_wt: 0,
                mt_fl: 0,
                mo_scs: 0,
                mo_wt: 0,
                mo_fl: 0,
            },
        }
    }
}

struct RecordingHandler {
    config: MockServerConfig,
    recorder: PacketRecorder,
    next_seq: AtomicU32,
}

#[async_trait]
impl Handler for RecordingHandler {
    async fn serve(
        &self,
        resp: &mut Response,
        req: &Request,
    ) -> std::result::Result<bool, ServerError> {
        self.recorder.record(req.header.clone(), req.packet.clone());

        match &req.packet {
            Packet::Login(login) => {
                let status = if self.config.accept_logins {
                    Status::OK
                } else {
                    Status::AUTH_ERROR
                };
                if let Some(Packet::LoginResp(login_resp)) = resp.packet_mut() {
                    login_resp.status = status.value();
                    login_resp.authenticator_server = smgp_protocol::server_authenticator(
                        status.value(),
                        &login.authenticator_client,
                        &self.config.secret,
                    );
                }
            }
            Packet::Submit(_) => {
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                let hex_id = smgp_protocol::pack_msg_id(1, &SystemClock, seq);
                let mut msg_id = [0u8; 10];
                for (i, byte) in msg_id.iter_mut().enumerate() {
                    *byte = u8::from_str_radix(&hex_id[i * 2..i * 2 + 2], 16).unwrap_or(0);
                }
                if let Some(Packet::SubmitResp(submit_resp)) = resp.packet_mut() {
                    submit_resp.msg_id = msg_id;
                    submit_resp.status = self.config.submit_status.value();
                }
            }
            Packet::Query(_) => {
                if let Some(Packet::QueryResp(query_resp)) = resp.packet_mut() {
                    query_resp.counters = self.config.query_counters;
                }
            }
            _ => {}
        }

        Ok(false)
    }
}

/// Builds a [`MockSmgpServer`] with canned behavior.
#[derive(Debug, Clone, Default)]
pub struct MockServerBuilder {
    config: MockServerConfig,
}

impl MockServerBuilder {
    /// Reject every `Login` with [`Status::AUTH_ERROR`], for testing a
    /// client's handshake-failure path.
    #[must_use]
    pub fn reject_logins(mut self) -> Self {
        self.config.accept_logins = false;
        self
    }

    /// Status returned in every `SubmitResp`.
    #[must_use]
    pub fn submit_status(mut self, status: Status) -> Self {
        self.config.submit_status = status;
        self
    }

    /// Counters returned in every `QueryResp`.
    #[must_use]
    pub fn query_counters(mut self, counters: QueryCounters) -> Self {
        self.config.query_counters = counters;
        self
    }

    /// Shared secret used to compute `LoginResp.authenticator_server`.
    /// Defaults to `"secret"`.
    #[must_use]
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = secret.into();
        self
    }

    /// Bind to an ephemeral loopback port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the listener or constructing the
    /// underlying [`Server`] fails.
    pub async fn build(self) -> Result<MockSmgpServer> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let recorder = PacketRecorder::default();
        let handler = RecordingHandler {
            config: self.config,
            recorder: recorder.clone(),
            next_seq: AtomicU32::new(0),
        };

        let server_config = ServerConfig::new(addr.ip().to_string(), addr.port());
        let server = Server::new(server_config, vec![Box::new(handler)])?;

        tracing::debug!(%addr, "mock smgp server listening");
        let handle = tokio::spawn(async move {
            let _ = server.serve(listener).await;
        });

        Ok(MockSmgpServer {
            addr,
            recorder,
            handle,
        })
    }
}

/// A running mock SMGP peer, listening on an OS-assigned loopback port.
pub struct MockSmgpServer {
    addr: SocketAddr,
    recorder: PacketRecorder,
    handle: JoinHandle<()>,
}

impl MockSmgpServer {
    /// Start building a mock server with default (accept-everything)
    /// behavior.
    #[must_use]
    pub fn builder() -> MockServerBuilder {
        MockServerBuilder::default()
    }

    /// The address the server is listening on.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Every frame the server has received so far.
    #[must_use]
    pub fn recorded(&self) -> Vec<RecordedPacket> {
        self.recorder.recorded()
    }

    /// Stop serving new connections.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl Drop for MockSmgpServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
