//! TCP accept loop: binds a listener, spawns a [`ServerConn`] per
//! connection, and retries transient accept errors with exponential
//! backoff.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::conn::ServerConn;
use crate::error::{Error, Result};
use crate::handler::HandlerChain;

const INITIAL_ACCEPT_BACKOFF: Duration = Duration::from_millis(5);
const MAX_ACCEPT_BACKOFF: Duration = Duration::from_secs(1);

/// An SMGP server bound to a single listener address.
pub struct Server {
    config: ServerConfig,
    handlers: Arc<HandlerChain>,
}

impl Server {
    /// Build a server from a configuration and the chain of handlers that
    /// will process every connection's frames.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyServerAddr`] if `config.host` is empty, or
    /// [`Error::NoHandlers`] if `handlers` is empty.
    pub fn new(config: ServerConfig, handlers: Vec<Box<dyn crate::handler::Handler>>) -> Result<Self> {
        if config.host.is_empty() {
            return Err(Error::EmptyServerAddr);
        }
        let handlers = HandlerChain::new(handlers)?;
        Ok(Self {
            config,
            handlers: Arc::new(handlers),
        })
    }

    /// Bind and serve forever, accepting connections and dispatching each
    /// to its own task. Transient accept errors are retried with
    /// exponential backoff starting at 5ms, doubling, capped at 1s;
    /// anything else propagates and ends the loop.
    pub async fn listen_and_serve(&self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        info!(%addr, "smgp server listening");
        self.serve(listener).await
    }

    /// Accept connections from an already-bound listener.
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let mut backoff = Duration::ZERO;
        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    backoff = Duration::ZERO;
                    info!(%peer, "accepted connection");
                    self.spawn_conn(stream);
                }
                Err(e) if is_transient(&e) => {
                    backoff = if backoff.is_zero() {
                        INITIAL_ACCEPT_BACKOFF
                    } else {
                        (backoff * 2).min(MAX_ACCEPT_BACKOFF)
                    };
                    warn!(error = %e, backoff_ms = backoff.as_millis(), "accept error, retrying");
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    fn spawn_conn(&self, stream: TcpStream) {
        let config = self.config.clone();
        let handlers = Arc::clone(&self.handlers);
        tokio::spawn(async move {
            ServerConn::new(stream, config, handlers).serve().await;
        });
    }
}

/// Whether an accept error is worth retrying rather than tearing down the
/// listener. `WouldBlock`/`Interrupted` surface from some platforms'
/// accept(2) wrappers even though the listener is perfectly healthy.
fn is_transient(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        std::io::ErrorKind::WouldBlock
            | std::io::ErrorKind::Interrupted
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::ConnectionReset
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_addr() {
        let config = ServerConfig::new("", 9000);
        let err = Server::new(config, vec![]);
        assert!(matches!(err, Err(Error::EmptyServerAddr)));
    }

    #[test]
    fn rejects_empty_handler_chain() {
        let config = ServerConfig::new("127.0.0.1", 9000);
        let err = Server::new(config, vec![]);
        assert!(matches!(err, Err(Error::NoHandlers)));
    }
}
