//! Client configuration.

use std::time::Duration;

use smgp_protocol::{DeliveryReportFormat, LoginMode};

/// Client credentials for the `Login` handshake.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// `ClientID`, at most 8 ASCII digits.
    pub client_id: String,
    /// Shared secret used to compute the authenticator digest.
    pub secret: String,
    /// Requested login mode (transceiver/transmitter/receiver).
    pub login_mode: LoginMode,
}

impl Credentials {
    /// Build credentials requesting [`LoginMode::Transmit`].
    #[must_use]
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
            login_mode: LoginMode::Transmit,
        }
    }

    /// Override the requested login mode.
    #[must_use]
    pub fn login_mode(mut self, mode: LoginMode) -> Self {
        self.login_mode = mode;
        self
    }
}

/// Timeout configuration for the phases of a client session.
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Time to establish the TCP connection (default: 15s).
    pub connect_timeout: Duration,
    /// Time to complete the `Login`/`LoginResp` exchange (default: 10s).
    pub login_timeout: Duration,
    /// Time to wait for any single frame once connected (default: 60s).
    pub read_timeout: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            login_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(60),
        }
    }
}

impl TimeoutConfig {
    /// Create a timeout configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TCP connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the login exchange timeout.
    #[must_use]
    pub fn login_timeout(mut self, timeout: Duration) -> Self {
        self.login_timeout = timeout;
        self
    }

    /// Set the per-frame read timeout.
    #[must_use]
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}

/// Configuration for connecting to an SMGP gateway.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ClientConfig {
    /// Gateway hostname or IP address.
    pub host: String,
    /// Gateway port.
    pub port: u16,
    /// `Login` credentials.
    pub credentials: Credentials,
    /// Timeouts for connect/login/read phases.
    pub timeouts: TimeoutConfig,
    /// Interval on which the client sends unsolicited `ActiveTest` frames
    /// while idle (default: 30s). `None` disables client-initiated keepalive.
    pub active_test_interval: Option<Duration>,
    /// Largest accepted `PacketLength` from the peer (default: 64 KiB).
    pub max_packet_length: u32,
    /// Which delivery-report sub-format the gateway is expected to use
    /// inside a report `Deliver`'s `msg_content`.
    pub delivery_report_format: DeliveryReportFormat,
}

impl ClientConfig {
    /// Create a configuration from a host, port, and credentials, with
    /// default timeouts and a 30s active-test interval.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, credentials: Credentials) -> Self {
        Self {
            host: host.into(),
            port,
            credentials,
            timeouts: TimeoutConfig::default(),
            active_test_interval: Some(Duration::from_secs(30)),
            max_packet_length: smgp_protocol::PACKET_LENGTH_MAX,
            delivery_report_format: DeliveryReportFormat::FixedOffset,
        }
    }

    /// Override the timeout configuration.
    #[must_use]
    pub fn timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Override the active-test keepalive interval.
    #[must_use]
    pub fn active_test_interval(mut self, interval: Option<Duration>) -> Self {
        self.active_test_interval = interval;
        self
    }

    /// Disable client-initiated `ActiveTest` keepalive.
    #[must_use]
    pub fn no_active_test(mut self) -> Self {
        self.active_test_interval = None;
        self
    }

    /// Override the accepted `PacketLength` ceiling.
    #[must_use]
    pub fn max_packet_length(mut self, max: u32) -> Self {
        self.max_packet_length = max;
        self
    }

    /// Override the delivery-report sub-format expected from the gateway.
    #[must_use]
    pub fn delivery_report_format(mut self, format: DeliveryReportFormat) -> Self {
        self.delivery_report_format = format;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn credentials_default_login_mode_is_transmit() {
        let creds = Credentials::new("12345678", "secret");
        assert_eq!(creds.login_mode, LoginMode::Transmit);
    }

    #[test]
    fn client_config_defaults() {
        let config = ClientConfig::new("localhost", 9000, Credentials::new("12345678", "secret"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.timeouts.connect_timeout, Duration::from_secs(15));
        assert_eq!(config.active_test_interval, Some(Duration::from_secs(30)));
    }

    #[test]
    fn client_config_builder() {
        let config = ClientConfig::new("localhost", 9000, Credentials::new("12345678", "secret"))
            .timeouts(TimeoutConfig::new().read_timeout(Duration::from_secs(5)))
            .no_active_test();
        assert_eq!(config.timeouts.read_timeout, Duration::from_secs(5));
        assert_eq!(config.active_test_interval, None);
    }
}
