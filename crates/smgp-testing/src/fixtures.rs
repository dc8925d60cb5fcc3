//! Canned packet builders for tests, so suites don't repeat the same
//! field lists for every `Login`/`Submit`/`Deliver`.

use bytes::Bytes;
use smgp_protocol::{Deliver, Login, LoginMode, Options, Submit};

/// Build a `Login` for `client_id`/`secret`, computing the authenticator
/// digest the way a real client would.
#[must_use]
pub fn login_fixture(client_id: &str, secret: &str, login_mode: LoginMode) -> Login {
    let timestamp = smgp_protocol::format_timestamp(&smgp_protocol::SystemClock);
    Login {
        authenticator_client: smgp_protocol::client_authenticator(client_id, secret, timestamp),
        client_id: client_id.to_string(),
        login_mode: login_mode as u8,
        timestamp,
        client_version: smgp_protocol::VERSION,
    }
}

/// Build a minimal single-segment `Submit` to `dest` carrying `text` as
/// raw `msg_content` bytes (no transcoding applied).
#[must_use]
pub fn submit_fixture(dest: &str, text: &str) -> Submit {
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
        dest_term_ids: vec![dest.to_string()],
        msg_content: Bytes::copy_from_slice(text.as_bytes()),
        reserve: String::new(),
        options: Options::new(),
    }
}

/// Build a `Deliver` carrying an ordinary MO message (not a delivery
/// report) from `src` to `dest`.
#[must_use]
pub fn deliver_fixture(src: &str, dest: &str, text: &str) -> Deliver {
    Deliver {
        msg_id: [0u8; 10],
        is_report: 0,
        msg_format: 0,
        recv_time: String::new(),
        src_term_id: src.to_string(),
        dest_term_id: dest.to_string(),
        msg_content: Bytes::copy_from_slice(text.as_bytes()),
        reserve: String::new(),
        options: Options::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_fixture_computes_a_real_authenticator() {
        let login = login_fixture("10000001", "secret", LoginMode::Transmit);
        assert_eq!(login.login_mode, LoginMode::Transmit as u8);
        assert_ne!(login.authenticator_client, [0u8; 16]);
    }

    #[test]
    fn submit_fixture_targets_one_destination() {
        let submit = submit_fixture("13800000000", "hello");
        assert_eq!(submit.dest_term_ids, vec!["13800000000".to_string()]);
        assert_eq!(submit.msg_content.as_ref(), b"hello");
    }
}
