//! Error handling and recovery patterns example.
//!
//! This example demonstrates how to handle the error variants a client
//! session can return, and a simple retry pattern for the connect phase.
//!
//! # Running
//!
//! ```bash
//! export SMGP_HOST=localhost
//! export SMGP_PORT=9000
//!
//! cargo run --example error_handling
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)]

use smgp_client::{Client, ClientConfig, Credentials, Error};
use std::time::Duration;

/// Attempt `Client::connect`, retrying connect-timeout/IO failures with
/// backoff but failing immediately on a rejected login.
async fn connect_with_retry(config: ClientConfig, max_retries: u32) -> Result<Client, Error> {
    let mut attempts = 0;
    loop {
        match Client::connect(config.clone()).await {
            Ok(client) => return Ok(client),
            Err(Error::LoginRejected(status)) => {
                println!("  Login rejected with status {status}; not retrying");
                return Err(Error::LoginRejected(status));
            }
            Err(e) if attempts < max_retries => {
                attempts += 1;
                let delay = Duration::from_millis(100 * 2u64.pow(attempts));
                println!("  Connect failed ({e}), retrying in {delay:?} (attempt {attempts}/{max_retries})");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let host = std::env::var("SMGP_HOST").unwrap_or_else(|_| "localhost".into());
    let port: u16 = std::env::var("SMGP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(9000);

    println!("=== Error Handling Examples ===\n");

    println!("1. Connecting with retry on transient failures:");
    let config = ClientConfig::new(host.clone(), port, Credentials::new("10000001", "secret"));
    match connect_with_retry(config, 3).await {
        Ok(client) => {
            println!("  Connected.");
            client.disconnect().await;
        }
        Err(e) => println!("  Gave up: {e}"),
    }

    println!("\n2. Authentication error (expected to fail with a bad secret):");
    let bad_config = ClientConfig::new(host, port, Credentials::new("10000001", "wrong-secret"))
        .timeouts(smgp_client::TimeoutConfig::new().connect_timeout(Duration::from_secs(5)));
    match Client::connect(bad_config).await {
        Ok(_) => println!("  Unexpectedly connected!"),
        Err(Error::LoginRejected(status)) => {
            println!("  Login rejected: {status}");
            println!("  This is expected - do not retry auth failures");
        }
        Err(e) => println!("  Other error: {e}"),
    }

    println!("\n3. Error categorization:");
    demonstrate_error_categorization();

    println!("\nAll error handling examples completed.");
    Ok(())
}

fn demonstrate_error_categorization() {
    let errors: Vec<(&str, &dyn std::fmt::Display)> = vec![
        ("Connect timeout", &Error::ConnectTimeout),
        ("Login timeout", &Error::LoginTimeout),
        ("Connection closed", &Error::ConnectionClosed),
    ];

    for (name, error) in errors {
        let message = error.to_string();
        let retriable = message.contains("timed out") || message.contains("closed");
        let action = if retriable {
            "Retry with backoff"
        } else {
            "Investigate"
        };
        println!("  {name} -> {message} -> {action}");
    }
}
