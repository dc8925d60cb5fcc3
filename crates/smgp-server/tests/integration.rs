//! End-to-end round trip between [`smgp_client::Client`] and
//! [`smgp_server::Server`] over a loopback socket — no external gateway
//! required.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use smgp_protocol::{Options, Packet, Status, Submit, SystemClock};
use smgp_server::{Error, Handler, Request, Response, Server, ServerConfig};
use tokio::net::TcpListener;

const CLIENT_ID: &str = "10000001";
const SECRET: &str = "testsecret123456";

struct LoginHandler;

#[async_trait]
impl Handler for LoginHandler {
    async fn serve(&self, resp: &mut Response, req: &Request) -> Result<bool, Error> {
        let Packet::Login(login) = &req.packet else {
            return Ok(true);
        };
        let expected = smgp_protocol::client_authenticator(CLIENT_ID, SECRET, login.timestamp);
        let status = if login.client_id == CLIENT_ID && login.authenticator_client == expected {
            Status::OK
        } else {
            Status::AUTH_ERROR
        };
        if let Some(Packet::LoginResp(login_resp)) = resp.packet_mut() {
            login_resp.status = status.value();
            login_resp.authenticator_server = smgp_protocol::server_authenticator(
                status.value(),
                &login.authenticator_client,
                SECRET,
            );
        }
        Ok(false)
    }
}

struct SubmitHandler {
    next_seq: AtomicU32,
}

#[async_trait]
impl Handler for SubmitHandler {
    async fn serve(&self, resp: &mut Response, req: &Request) -> Result<bool, Error> {
        if !matches!(req.packet, Packet::Submit(_)) {
            return Ok(true);
        }
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let hex_id = smgp_protocol::pack_msg_id(1, &SystemClock, seq);
        let mut msg_id = [0u8; 10];
        for (i, byte) in msg_id.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex_id[i * 2..i * 2 + 2], 16).unwrap_or(0);
        }
        if let Some(Packet::SubmitResp(submit_resp)) = resp.packet_mut() {
            submit_resp.msg_id = msg_id;
            submit_resp.status = Status::OK.value();
        }
        Ok(false)
    }
}

async fn spawn_server() -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = ServerConfig::new("127.0.0.1", addr.port());
    let server = Server::new(
        config,
        vec![
            Box::new(LoginHandler),
            Box::new(SubmitHandler {
                next_seq: AtomicU32::new(0),
            }),
        ],
    )
    .unwrap();
    tokio::spawn(async move {
        server.serve(listener).await.ok();
    });
    addr
}

fn test_submit() -> Submit {
    Submit {
        msg_type: 6,
        need_report: 1,
        priority: 0,
        service_id: "test".to_string(),
        fee_type: "01".to_string(),
        fee_code: "000000".to_string(),
        fixed_fee: "000000".to_string(),
        msg_format: 0,
        valid_time: String::new(),
        at_time: String::new(),
        src_term_id: "10000001".to_string(),
        charge_term_id: String::new(),
        dest_term_ids: vec!["13800000000".to_string()],
        msg_content: Bytes::from_static(b"hello from a test"),
        reserve: String::new(),
        options: Options::new(),
    }
}

#[tokio::test]
async fn client_logs_in_and_submits_against_the_server() {
    let addr = spawn_server().await;

    let config = smgp_client::ClientConfig::new(
        addr.ip().to_string(),
        addr.port(),
        smgp_client::Credentials::new(CLIENT_ID, SECRET),
    );
    let mut client = smgp_client::Client::connect(config).await.unwrap();

    let resp = client.submit(test_submit()).await.unwrap();
    assert_ne!(resp.msg_id, [0u8; 10]);
    assert_eq!(smgp_protocol::Status::from(resp.status), smgp_protocol::Status::OK);

    client.disconnect().await;
}

#[tokio::test]
async fn wrong_secret_is_rejected_at_login() {
    let addr = spawn_server().await;

    let config = smgp_client::ClientConfig::new(
        addr.ip().to_string(),
        addr.port(),
        smgp_client::Credentials::new(CLIENT_ID, "wrong-secret"),
    );
    let result = smgp_client::Client::connect(config).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn active_test_round_trips() {
    let addr = spawn_server().await;

    let config = smgp_client::ClientConfig::new(
        addr.ip().to_string(),
        addr.port(),
        smgp_client::Credentials::new(CLIENT_ID, SECRET),
    );
    let mut client = smgp_client::Client::connect(config).await.unwrap();
    client.active_test().await.unwrap();
    client.disconnect().await;
}
