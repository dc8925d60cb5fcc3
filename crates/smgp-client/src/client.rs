//! SMGP client session.

use std::time::Duration;

use smgp_codec::{Connection, ConnectionState, Frame};
use smgp_protocol::{
    Deliver, DeliverResp, DeliveryReport, Login, Packet, Query, QueryResp, RequestId, Status,
    Submit, SubmitResp, SystemClock,
};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// An authenticated SMGP session over a TCP connection.
///
/// `Client` wraps a [`smgp_codec::Connection`] and drives the `Login`
/// handshake on [`Client::connect`]; once connected it exposes
/// request/response pairs for `Submit` and `Query`, a client-initiated
/// `active_test` ping, and [`Client::recv`] for unsolicited `Deliver` and
/// `ActiveTest` frames pushed by the gateway.
pub struct Client {
    config: ClientConfig,
    connection: Connection<TcpStream>,
}

impl Client {
    /// Connect to the gateway and complete the `Login` handshake.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port);

        tracing::info!(host = %config.host, port = config.port, "connecting to SMGP gateway");

        let tcp_stream = timeout(config.timeouts.connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| Error::ConnectTimeout)??;
        tcp_stream.set_nodelay(true)?;

        let connection =
            Connection::new(tcp_stream).with_max_packet_length(config.max_packet_length);

        let mut client = Self { config, connection };
        client.login().await?;
        Ok(client)
    }

    async fn login(&mut self) -> Result<()> {
        let timestamp = smgp_protocol::format_timestamp(&SystemClock);
        let authenticator_client = smgp_protocol::client_authenticator(
            &self.config.credentials.client_id,
            &self.config.credentials.secret,
            timestamp,
        );

        let login = Login {
            client_id: self.config.credentials.client_id.clone(),
            authenticator_client,
            login_mode: self.config.credentials.login_mode as u8,
            timestamp,
            client_version: smgp_protocol::VERSION,
        };

        let sequence_id = self.connection.next_sequence_id().await?;
        self.connection
            .send(&Packet::Login(login), sequence_id)
            .await?;

        let login_timeout = self.config.timeouts.login_timeout;
        let frame = timeout(login_timeout, self.connection.recv(Some(login_timeout)))
            .await
            .map_err(|_| Error::LoginTimeout)??;

        let resp = match frame.packet {
            Packet::LoginResp(resp) => resp,
            other => {
                return Err(Error::UnexpectedResponse {
                    expected: RequestId::LoginResp,
                    got: other.request_id(),
                });
            }
        };

        let status = Status::from(resp.status);
        if !status.is_ok() {
            return Err(Error::LoginRejected(status));
        }

        let expected_server_auth = smgp_protocol::server_authenticator(
            resp.status,
            &authenticator_client,
            &self.config.credentials.secret,
        );
        if resp.authenticator_server != expected_server_auth {
            return Err(Error::ServerAuthMismatch);
        }

        tracing::info!(server_version = resp.server_version, "login accepted");
        self.connection.set_state(ConnectionState::AuthOk);
        Ok(())
    }

    /// Send `Submit` and wait for its `SubmitResp`.
    pub async fn submit(&mut self, submit: Submit) -> Result<SubmitResp> {
        let sequence_id = self.connection.next_sequence_id().await?;
        self.connection
            .send(&Packet::Submit(submit), sequence_id)
            .await?;
        self.expect_resp(RequestId::SubmitResp, |packet| match packet {
            Packet::SubmitResp(resp) => Some(resp),
            _ => None,
        })
        .await
    }

    /// Send `Query` and wait for its `QueryResp`.
    pub async fn query(&mut self, query: Query) -> Result<QueryResp> {
        let sequence_id = self.connection.next_sequence_id().await?;
        self.connection
            .send(&Packet::Query(query), sequence_id)
            .await?;
        self.expect_resp(RequestId::QueryResp, |packet| match packet {
            Packet::QueryResp(resp) => Some(resp),
            _ => None,
        })
        .await
    }

    /// Send an unsolicited `ActiveTest` and wait for the gateway's
    /// `ActiveTestResp`. Intended to be driven on a timer by callers that
    /// want client-initiated keepalive (see
    /// [`ClientConfig::active_test_interval`]).
    pub async fn active_test(&mut self) -> Result<()> {
        let sequence_id = self.connection.next_sequence_id().await?;
        self.connection
            .send(&Packet::ActiveTest, sequence_id)
            .await?;
        let frame = self
            .connection
            .recv(Some(self.config.timeouts.read_timeout))
            .await?;
        match frame.packet {
            Packet::ActiveTestResp => Ok(()),
            other => Err(Error::UnexpectedResponse {
                expected: RequestId::ActiveTestResp,
                got: other.request_id(),
            }),
        }
    }

    /// Receive the next frame, whether an unsolicited `Deliver`, an
    /// `ActiveTest` ping from the gateway, or any other packet.
    pub async fn recv(&mut self) -> Result<Frame> {
        Ok(self
            .connection
            .recv(Some(self.config.timeouts.read_timeout))
            .await?)
    }

    /// Respond to a gateway-initiated `ActiveTest` ping.
    pub async fn reply_active_test(&self, sequence_id: u32) -> Result<()> {
        self.connection
            .send(&Packet::ActiveTestResp, sequence_id)
            .await?;
        Ok(())
    }

    /// Decode `deliver.msg_content` as a delivery report, using the sub-format
    /// configured on this client (see [`ClientConfig::delivery_report_format`]).
    ///
    /// Only meaningful when `deliver.is_report == 1`; callers that want to
    /// tell an ordinary MO message from a report should check that field
    /// before calling this.
    pub fn delivery_report(&self, deliver: &Deliver) -> Result<DeliveryReport> {
        Ok(DeliveryReport::decode(
            &deliver.msg_content,
            self.config.delivery_report_format,
        )?)
    }

    /// Acknowledge a received `Deliver` with its `DeliverResp`.
    pub async fn ack_deliver(
        &self,
        sequence_id: u32,
        deliver: &Deliver,
        status: Status,
    ) -> Result<()> {
        self.connection
            .send(
                &Packet::DeliverResp(DeliverResp {
                    msg_id: deliver.msg_id,
                    status: status.value(),
                }),
                sequence_id,
            )
            .await?;
        Ok(())
    }

    /// Send `Exit` and wait briefly for `ExitResp`, ignoring a timeout — the
    /// peer is allowed to close without responding.
    pub async fn disconnect(mut self) {
        let Ok(sequence_id) = self.connection.next_sequence_id().await else {
            return;
        };
        if self
            .connection
            .send(&Packet::Exit, sequence_id)
            .await
            .is_err()
        {
            return;
        }
        let _ = timeout(Duration::from_secs(2), self.connection.recv(None)).await;
        self.connection.close().await;
    }

    async fn expect_resp<T>(
        &mut self,
        expected: RequestId,
        extract: impl FnOnce(Packet) -> Option<T>,
    ) -> Result<T> {
        let frame = self
            .connection
            .recv(Some(self.config.timeouts.read_timeout))
            .await?;
        let got = frame.packet.request_id();
        extract(frame.packet).ok_or(Error::UnexpectedResponse { expected, got })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use smgp_codec::Connection as ServerConnection;
    use smgp_protocol::LoginResp;
    use tokio::net::TcpListener;

    async fn bound_config() -> (TcpListener, ClientConfig) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let config = ClientConfig::new(
            addr.ip().to_string(),
            addr.port(),
            Credentials::new("12345678", "secret"),
        );
        (listener, config)
    }

    #[tokio::test]
    async fn connect_fails_on_login_rejection() {
        let (listener, config) = bound_config().await;

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut conn = ServerConnection::new(stream);
            let frame = conn.recv(None).await.unwrap();
            assert!(matches!(frame.packet, Packet::Login(_)));
            conn.send(
                &Packet::LoginResp(LoginResp {
                    status: Status::AUTH_ERROR.value(),
                    authenticator_server: [0u8; 16],
                    server_version: smgp_protocol::VERSION,
                }),
                frame.header.sequence_id,
            )
            .await
            .unwrap();
        });

        let result = Client::connect(config).await;
        server.await.unwrap();
        assert!(matches!(result, Err(Error::LoginRejected(s)) if s == Status::AUTH_ERROR));
    }

    #[tokio::test]
    async fn connect_succeeds_and_submit_round_trips() {
        let (listener, config) = bound_config().await;

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut conn = ServerConnection::new(stream);

            let login_frame = conn.recv(None).await.unwrap();
            let Packet::Login(login) = &login_frame.packet else {
                panic!("expected Login");
            };
            let authenticator_server = smgp_protocol::server_authenticator(
                Status::OK.value(),
                &login.authenticator_client,
                "secret",
            );
            conn.send(
                &Packet::LoginResp(LoginResp {
                    status: Status::OK.value(),
                    authenticator_server,
                    server_version: smgp_protocol::VERSION,
                }),
                login_frame.header.sequence_id,
            )
            .await
            .unwrap();

            let submit_frame = conn.recv(None).await.unwrap();
            let Packet::Submit(_) = submit_frame.packet else {
                panic!("expected Submit");
            };
            conn.send(
                &Packet::SubmitResp(SubmitResp {
                    msg_id: [0u8; 10],
                    status: Status::OK.value(),
                }),
                submit_frame.header.sequence_id,
            )
            .await
            .unwrap();
        });

        let mut client = Client::connect(config).await.unwrap();
        let submit = Submit {
            msg_type: 6,
            need_report: 1,
            priority: 0,
            service_id: "test".to_string(),
            fee_type: "01".to_string(),
            fee_code: "000001".to_string(),
            fixed_fee: "000000".to_string(),
            msg_format: 0,
            valid_time: String::new(),
            at_time: String::new(),
            src_term_id: "10000".to_string(),
            charge_term_id: "13800138000".to_string(),
            dest_term_ids: vec!["13800138000".to_string()],
            msg_content: bytes::Bytes::from_static(b"hello"),
            reserve: String::new(),
            options: smgp_protocol::Options::new(),
        };
        let resp = client.submit(submit).await.unwrap();
        assert_eq!(Status::from(resp.status), Status::OK);

        server.await.unwrap();
    }

    #[tokio::test]
    async fn delivery_report_decodes_with_the_configured_format() {
        let (listener, config) = bound_config().await;

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut conn = ServerConnection::new(stream);
            let frame = conn.recv(None).await.unwrap();
            let Packet::Login(login) = &frame.packet else {
                panic!("expected Login");
            };
            let authenticator_server = smgp_protocol::server_authenticator(
                Status::OK.value(),
                &login.authenticator_client,
                "secret",
            );
            conn.send(
                &Packet::LoginResp(LoginResp {
                    status: Status::OK.value(),
                    authenticator_server,
                    server_version: smgp_protocol::VERSION,
                }),
                frame.header.sequence_id,
            )
            .await
            .unwrap();
        });

        let client = Client::connect(config).await.unwrap();
        server.await.unwrap();

        let report = smgp_protocol::DeliveryReport {
            msg_id: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
            sub: 1,
            dlvrd: 1,
            submit_date: "2607291200".to_string(),
            done_date: "2607291201".to_string(),
            stat: "DELIVRD".to_string(),
            err: 0,
            text: "hi".to_string(),
        };
        let deliver = Deliver {
            msg_id: report.msg_id,
            is_report: 1,
            msg_format: 0,
            recv_time: "2607291201".to_string(),
            src_term_id: "10000001".to_string(),
            dest_term_id: "13800000000".to_string(),
            msg_content: bytes::Bytes::from(report.encode(client.config.delivery_report_format)),
            reserve: String::new(),
            options: smgp_protocol::Options::new(),
        };

        assert_eq!(client.delivery_report(&deliver).unwrap(), report);
        client.disconnect().await;
    }
}
