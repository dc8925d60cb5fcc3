//! Live SMGP gateway integration tests.
//!
//! These tests exercise [`Client`] against a real SMGP gateway. They are
//! `#[ignore]`d by default since no gateway is available in CI; run them
//! with `cargo test -- --ignored` against a configured endpoint, driven by
//! the `SMGP_HOST`/`SMGP_PORT`/`SMGP_CLIENT_ID`/`SMGP_SECRET` environment
//! variables.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use bytes::Bytes;
use smgp_client::{Client, ClientConfig, Credentials};
use smgp_protocol::{Options, Query, Submit};

fn get_test_config() -> Option<ClientConfig> {
    let host = std::env::var("SMGP_HOST").ok()?;
    let port: u16 = std::env::var("SMGP_PORT").ok()?.parse().ok()?;
    let client_id = std::env::var("SMGP_CLIENT_ID").ok()?;
    let secret = std::env::var("SMGP_SECRET").ok()?;
    Some(ClientConfig::new(
        host,
        port,
        Credentials::new(client_id, secret),
    ))
}

fn demo_submit() -> Submit {
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
        msg_content: Bytes::from_static(b"integration test"),
        reserve: String::new(),
        options: Options::new(),
    }
}

#[tokio::test]
#[ignore = "Requires an SMGP gateway"]
async fn test_basic_connection() {
    let config = get_test_config().expect("SMGP gateway config required");
    let client = Client::connect(config).await.expect("Failed to connect");
    client.disconnect().await;
}

#[tokio::test]
#[ignore = "Requires an SMGP gateway"]
async fn test_connection_with_invalid_credentials() {
    let config = get_test_config().expect("SMGP gateway config required");
    let config = ClientConfig::new(
        config.host.clone(),
        config.port,
        Credentials::new("00000000", "definitely-wrong-secret"),
    );
    let result = Client::connect(config).await;
    assert!(result.is_err(), "Expected login to be rejected");
}

#[tokio::test]
#[ignore = "Requires an SMGP gateway"]
async fn test_submit_round_trip() {
    let config = get_test_config().expect("SMGP gateway config required");
    let mut client = Client::connect(config).await.expect("Failed to connect");

    let resp = client
        .submit(demo_submit())
        .await
        .expect("Submit should succeed");
    assert_ne!(resp.msg_id, [0u8; 10], "Gateway should assign a MsgId");

    client.disconnect().await;
}

#[tokio::test]
#[ignore = "Requires an SMGP gateway"]
async fn test_query_counters() {
    let config = get_test_config().expect("SMGP gateway config required");
    let mut client = Client::connect(config).await.expect("Failed to connect");

    let query = Query {
        time: "20260729".to_string(),
        query_type: 0,
        query_code: String::new(),
    };
    let resp = client.query(query).await.expect("Query should succeed");
    assert_eq!(resp.time, "20260729");

    client.disconnect().await;
}

#[tokio::test]
#[ignore = "Requires an SMGP gateway"]
async fn test_active_test_keepalive() {
    let config = get_test_config().expect("SMGP gateway config required");
    let mut client = Client::connect(config).await.expect("Failed to connect");

    client
        .active_test()
        .await
        .expect("First ActiveTest should succeed");
    client
        .active_test()
        .await
        .expect("Second ActiveTest should succeed");

    client.disconnect().await;
}

#[tokio::test]
#[ignore = "Requires an SMGP gateway"]
async fn test_multiple_submits_same_connection() {
    let config = get_test_config().expect("SMGP gateway config required");
    let mut client = Client::connect(config).await.expect("Failed to connect");

    for _ in 0..5 {
        let resp = client
            .submit(demo_submit())
            .await
            .expect("Submit should succeed");
        assert_ne!(resp.msg_id, [0u8; 10]);
    }

    client.disconnect().await;
}
