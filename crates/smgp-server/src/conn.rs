//! Per-connection session loop: read a frame, dispatch it through the
//! handler chain, write back whatever response the chain produced, and
//! keep the link alive with a ticking `ActiveTest` scheduler.

use std::sync::Arc;

use smgp_codec::{CodecError, Connection, ConnectionState};
use smgp_protocol::{Packet, Status};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::error::Error;
use crate::handler::{HandlerChain, Request, Response};

/// A single accepted connection, driven to completion by [`ServerConn::serve`].
pub struct ServerConn<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    conn: Connection<T>,
    config: ServerConfig,
    handlers: Arc<HandlerChain>,
}

impl<T> ServerConn<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    /// Wrap an accepted transport for driving.
    #[must_use]
    pub fn new(transport: T, config: ServerConfig, handlers: Arc<HandlerChain>) -> Self {
        let conn = Connection::new(transport).with_max_packet_length(config.max_packet_length);
        Self {
            conn,
            config,
            handlers,
        }
    }

    /// Drive the connection until it closes, either because the peer hung
    /// up, a read failed, or the active-test miss threshold was exceeded.
    ///
    /// Runs a single task: the per-frame read and the `ActiveTest` ticker
    /// share one `select!`, so both can drive the same `Connection` without
    /// needing a second handle to its `SequenceID` generator.
    pub async fn serve(mut self) {
        let mut outstanding: u32 = 0;
        let mut ticker = tokio::time::interval(self.config.active_test_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if outstanding >= self.config.active_test_miss_threshold {
                        debug!("active-test miss threshold exceeded, closing connection");
                        break;
                    }
                    let Ok(sequence_id) = self.conn.next_sequence_id().await else {
                        break;
                    };
                    if self.conn.send(&Packet::ActiveTest, sequence_id).await.is_err() {
                        break;
                    }
                    outstanding += 1;
                }
                frame = self.conn.recv(Some(self.config.read_timeout)) => {
                    match frame {
                        Ok(frame) => {
                            if matches!(frame.packet, Packet::ActiveTestResp) {
                                outstanding = outstanding.saturating_sub(1);
                                continue;
                            }
                            if self.dispatch(frame).await.is_err() {
                                break;
                            }
                        }
                        Err(CodecError::ReadTimeout) => continue,
                        Err(CodecError::ConnectionClosed) => break,
                        Err(e) => {
                            warn!(error = %e, "connection read failed");
                            break;
                        }
                    }
                }
            }
        }

        let Ok(sequence_id) = self.conn.next_sequence_id().await else {
            self.conn.close().await;
            return;
        };
        let _ = self.conn.send(&Packet::Exit, sequence_id).await;
        self.conn.close().await;
    }

    async fn dispatch(&mut self, frame: smgp_codec::Frame) -> Result<(), Error> {
        let request = Request {
            header: frame.header,
            packet: frame.packet,
        };

        if let Packet::Login(login) = &request.packet {
            if login.client_version > self.config.version {
                warn!(client_version = login.client_version, "rejecting unsupported protocol version");
                self.conn.close().await;
                return Err(Error::UnsupportedVersion);
            }
        }

        let Some(mut response) = Response::skeleton_for(&request) else {
            // Inbound response packets other than `ActiveTestResp` (e.g. a
            // stray `ExitResp`) carry nothing to act on.
            return Ok(());
        };

        self.handlers.serve(&mut response, &request).await?;

        if matches!(request.packet, Packet::Login(_)) {
            if let Some(Packet::LoginResp(login_resp)) = response.packet() {
                if Status::from(login_resp.status).is_ok() {
                    self.conn.set_state(ConnectionState::AuthOk);
                }
            }
        }

        if let Some(packet) = response.packet() {
            self.conn.send(packet, response.sequence_id()).await?;
        }

        if matches!(request.packet, Packet::Exit) {
            return Err(Error::Codec(CodecError::ConnectionClosed));
        }

        Ok(())
    }
}
