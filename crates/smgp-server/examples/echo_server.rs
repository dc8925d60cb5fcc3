//! Minimal SMGP server: accepts a single hardcoded client id/secret,
//! assigns a synthetic `MsgID` to every `Submit`, and echoes `Query`
//! counters as zero. Useful for exercising [`smgp_client::Client`]
//! against a real socket without a production gateway.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use smgp_protocol::{Packet, Status, SystemClock};
use smgp_server::{Error, Handler, Request, Response, Server, ServerConfig};

const CLIENT_ID: &str = "10000001";
const SECRET: &str = "hunter22hunter22";
const SP_ID: u32 = 10000;

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
            login_resp.authenticator_server =
                smgp_protocol::server_authenticator(status.value(), &login.authenticator_client, SECRET);
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
        let hex_id = smgp_protocol::pack_msg_id(SP_ID, &SystemClock, seq);
        let mut msg_id = [0u8; 10];
        for (i, byte) in msg_id.iter_mut().enumerate() {
            if let Ok(parsed) = u8::from_str_radix(&hex_id[i * 2..i * 2 + 2], 16) {
                *byte = parsed;
            }
        }
        if let Some(Packet::SubmitResp(submit_resp)) = resp.packet_mut() {
            submit_resp.msg_id = msg_id;
            submit_resp.status = Status::OK.value();
        }
        Ok(false)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::new("0.0.0.0", 9000);
    let server = Server::new(
        config,
        vec![
            Box::new(LoginHandler),
            Box::new(SubmitHandler {
                next_seq: AtomicU32::new(0),
            }),
        ],
    )?;

    server.listen_and_serve().await?;
    Ok(())
}
