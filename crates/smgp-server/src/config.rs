//! Server configuration.

use std::time::Duration;

use bytes::Bytes;
use smgp_protocol::{Deliver, DeliveryReport, DeliveryReportFormat, Options};

/// Configuration for an SMGP server listener.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ServerConfig {
    /// Interface to bind the `TcpListener` to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Protocol version advertised in `LoginResp.server_version`; a
    /// `Login` whose `client_version` does not match this is rejected.
    pub version: u8,
    /// Interval between `ActiveTest` pings sent to an idle connection.
    pub active_test_interval: Duration,
    /// Consecutive un-acknowledged `ActiveTest` pings tolerated before a
    /// connection is torn down.
    pub active_test_miss_threshold: u32,
    /// Per-frame read deadline in the per-connection receive loop. A
    /// timeout here is not an error — it simply lets the active-test
    /// scheduler tick.
    pub read_timeout: Duration,
    /// Largest accepted `PacketLength` from a peer.
    pub max_packet_length: u32,
    /// Which delivery-report sub-format this server emits when pushing a
    /// report `Deliver`.
    pub delivery_report_format: DeliveryReportFormat,
}

impl ServerConfig {
    /// Create a configuration listening on `host:port` with the default
    /// active-test cadence (`T=30s, N=3`) and a 2s per-frame read timeout.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            version: smgp_protocol::VERSION,
            active_test_interval: Duration::from_secs(30),
            active_test_miss_threshold: 3,
            read_timeout: Duration::from_secs(2),
            max_packet_length: smgp_protocol::PACKET_LENGTH_MAX,
            delivery_report_format: DeliveryReportFormat::FixedOffset,
        }
    }

    /// Override the active-test tick interval and miss threshold.
    #[must_use]
    pub fn active_test(mut self, interval: Duration, miss_threshold: u32) -> Self {
        self.active_test_interval = interval;
        self.active_test_miss_threshold = miss_threshold;
        self
    }

    /// Override the per-frame read timeout.
    #[must_use]
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Override the accepted `PacketLength` ceiling.
    #[must_use]
    pub fn max_packet_length(mut self, max: u32) -> Self {
        self.max_packet_length = max;
        self
    }

    /// Override the delivery-report sub-format this server emits.
    #[must_use]
    pub fn delivery_report_format(mut self, format: DeliveryReportFormat) -> Self {
        self.delivery_report_format = format;
        self
    }
}

/// Build a report `Deliver` for `report`, encoded in `format`, addressed
/// from `src_term_id` (the SP service number) to `dest_term_id` (the
/// original submitter).
#[must_use]
pub fn build_report_deliver(
    report: &DeliveryReport,
    format: DeliveryReportFormat,
    src_term_id: impl Into<String>,
    dest_term_id: impl Into<String>,
    recv_time: impl Into<String>,
) -> Deliver {
    Deliver {
        msg_id: report.msg_id,
        is_report: 1,
        msg_format: 0,
        recv_time: recv_time.into(),
        src_term_id: src_term_id.into(),
        dest_term_id: dest_term_id.into(),
        msg_content: Bytes::from(report.encode(format)),
        reserve: String::new(),
        options: Options::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::new("127.0.0.1", 9000);
        assert_eq!(config.version, smgp_protocol::VERSION);
        assert_eq!(config.active_test_miss_threshold, 3);
        assert_eq!(config.read_timeout, Duration::from_secs(2));
    }

    #[test]
    fn builder_overrides() {
        let config = ServerConfig::new("127.0.0.1", 9000)
            .active_test(Duration::from_secs(1), 5)
            .read_timeout(Duration::from_millis(500));
        assert_eq!(config.active_test_interval, Duration::from_secs(1));
        assert_eq!(config.active_test_miss_threshold, 5);
        assert_eq!(config.read_timeout, Duration::from_millis(500));
    }

    #[test]
    fn report_deliver_carries_the_encoded_report() {
        let report = DeliveryReport {
            msg_id: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
            sub: 1,
            dlvrd: 1,
            submit_date: "2607291200".to_string(),
            done_date: "2607291201".to_string(),
            stat: "DELIVRD".to_string(),
            err: 0,
            text: "hi".to_string(),
        };
        let deliver = build_report_deliver(
            &report,
            DeliveryReportFormat::FixedOffset,
            "10000001",
            "13800000000",
            "2607291201",
        );
        assert_eq!(deliver.is_report, 1);
        assert_eq!(deliver.msg_id, report.msg_id);
        let decoded =
            DeliveryReport::decode(&deliver.msg_content, DeliveryReportFormat::FixedOffset)
                .unwrap();
        assert_eq!(decoded, report);
    }
}
