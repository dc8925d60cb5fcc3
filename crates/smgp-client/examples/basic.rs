//! Basic connection and submit example.
//!
//! This example demonstrates how to connect to an SMGP gateway, complete
//! the `Login` handshake, and submit a short message.
//!
//! # Running
//!
//! ```bash
//! export SMGP_HOST=localhost
//! export SMGP_PORT=9000
//! export SMGP_CLIENT_ID=10000001
//! export SMGP_SECRET=shared-secret
//!
//! cargo run --example basic
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)]

use bytes::Bytes;
use smgp_client::{Client, ClientConfig, Credentials, Error};
use smgp_protocol::{Options, Submit};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let host = std::env::var("SMGP_HOST").unwrap_or_else(|_| "localhost".into());
    let port: u16 = std::env::var("SMGP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(9000);
    let client_id = std::env::var("SMGP_CLIENT_ID").unwrap_or_else(|_| "10000001".into());
    let secret = std::env::var("SMGP_SECRET").unwrap_or_else(|_| "shared-secret".into());

    let config = ClientConfig::new(host.clone(), port, Credentials::new(client_id, secret));

    println!("Connecting to SMGP gateway at {host}:{port}...");
    let mut client = Client::connect(config).await?;
    println!("Login accepted.");

    let submit = Submit {
        msg_type: 6,
        need_report: 1,
        priority: 0,
        service_id: "demo".to_string(),
        fee_type: "01".to_string(),
        fee_code: "000000".to_string(),
        fixed_fee: "000000".to_string(),
        msg_format: 0,
        valid_time: String::new(),
        at_time: String::new(),
        src_term_id: "10000001".to_string(),
        charge_term_id: String::new(),
        dest_term_ids: vec!["13800000000".to_string()],
        msg_content: Bytes::from_static(b"hello from smgp-client"),
        reserve: String::new(),
        options: Options::new(),
    };

    let resp = client.submit(submit).await?;
    println!("SubmitResp status: {}", resp.status);

    client.disconnect().await;
    println!("Connection closed.");

    Ok(())
}
