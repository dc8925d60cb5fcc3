//! The ten packet body types, one struct per `RequestID`.
//!
//! Each type owns its own `encode`/`decode`; [`crate::packet::Packet`] is
//! the sum type that dispatches on `RequestID` to pick the right one.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::ProtocolError;
use crate::octet::{read_fixed_bytes, read_fixed_str, write_fixed_bytes, write_fixed_str};
use crate::prelude::*;
use crate::tlv::Options;

const CLIENT_ID_LEN: usize = 8;
const AUTHENTICATOR_LEN: usize = 16;
const SERVICE_ID_LEN: usize = 10;
const FEE_TYPE_LEN: usize = 2;
const FEE_CODE_LEN: usize = 6;
const FIXED_FEE_LEN: usize = 6;
const VALID_TIME_LEN: usize = 17;
const AT_TIME_LEN: usize = 17;
const TERM_ID_LEN: usize = 21;
const MSG_ID_LEN: usize = 10;
const QUERY_TIME_LEN: usize = 8;
const QUERY_CODE_LEN: usize = 10;
const RESERVE_LEN: usize = 8;

/// `Login` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
    /// SP-assigned client account id.
    pub client_id: String,
    /// `MD5(ClientID || 0x00*7 || Secret || Timestamp)`.
    pub authenticator_client: [u8; AUTHENTICATOR_LEN],
    /// Requested login mode.
    pub login_mode: u8,
    /// `MMDDhhmmss` packed as a decimal integer.
    pub timestamp: u32,
    /// Protocol version the client speaks.
    pub client_version: u8,
}

impl Login {
    /// Decode the body of a `Login` packet.
    pub fn decode(body: &mut impl Buf) -> Result<Self, ProtocolError> {
        let client_id = read_fixed_str(body, CLIENT_ID_LEN)?;
        let mut authenticator_client = [0u8; AUTHENTICATOR_LEN];
        authenticator_client.copy_from_slice(&read_fixed_bytes(body, AUTHENTICATOR_LEN)?);
        if body.remaining() < 5 {
            return Err(ProtocolError::IncompletePacket {
                expected: 5,
                actual: body.remaining(),
            });
        }
        let login_mode = body.get_u8();
        let timestamp = body.get_u32();
        let client_version = body.get_u8();
        Ok(Self {
            client_id,
            authenticator_client,
            login_mode,
            timestamp,
            client_version,
        })
    }

    /// Encode the body of a `Login` packet.
    pub fn encode(&self, dst: &mut impl BufMut) {
        write_fixed_str(dst, &self.client_id, CLIENT_ID_LEN);
        write_fixed_bytes(dst, &self.authenticator_client, AUTHENTICATOR_LEN);
        dst.put_u8(self.login_mode);
        dst.put_u32(self.timestamp);
        dst.put_u8(self.client_version);
    }
}

/// `LoginResp` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResp {
    /// Result of the login attempt.
    pub status: u32,
    /// `MD5(Status || AuthenticatorClient || Secret)`.
    pub authenticator_server: [u8; AUTHENTICATOR_LEN],
    /// Protocol version the server speaks.
    pub server_version: u8,
}

impl LoginResp {
    /// Decode the body of a `LoginResp` packet.
    pub fn decode(body: &mut impl Buf) -> Result<Self, ProtocolError> {
        if body.remaining() < 4 {
            return Err(ProtocolError::IncompletePacket {
                expected: 4,
                actual: body.remaining(),
            });
        }
        let status = body.get_u32();
        let mut authenticator_server = [0u8; AUTHENTICATOR_LEN];
        authenticator_server.copy_from_slice(&read_fixed_bytes(body, AUTHENTICATOR_LEN)?);
        if body.remaining() < 1 {
            return Err(ProtocolError::IncompletePacket {
                expected: 1,
                actual: body.remaining(),
            });
        }
        let server_version = body.get_u8();
        Ok(Self {
            status,
            authenticator_server,
            server_version,
        })
    }

    /// Encode the body of a `LoginResp` packet.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_u32(self.status);
        write_fixed_bytes(dst, &self.authenticator_server, AUTHENTICATOR_LEN);
        dst.put_u8(self.server_version);
    }
}

/// `Submit` request: a mobile-terminated message to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submit {
    /// Message direction (`MT`/`MO`).
    pub msg_type: u8,
    /// Whether a delivery report is requested.
    pub need_report: u8,
    /// SMSC delivery priority, 0 (lowest) to 3.
    pub priority: u8,
    /// SP service id.
    pub service_id: String,
    /// Billing fee type code.
    pub fee_type: String,
    /// Billing fee code.
    pub fee_code: String,
    /// Fixed fee amount, as a decimal string.
    pub fixed_fee: String,
    /// Content encoding.
    pub msg_format: u8,
    /// `YYMMDDhhmmsstnnp` validity window, or all-zero for none.
    pub valid_time: String,
    /// Scheduled delivery time, same format as `valid_time`.
    pub at_time: String,
    /// Originating terminal (MSISDN).
    pub src_term_id: String,
    /// Terminal charged for the message, if different from the recipient.
    pub charge_term_id: String,
    /// Destination terminals.
    pub dest_term_ids: Vec<String>,
    /// Raw message content (already segmented/encoded by the caller).
    pub msg_content: Bytes,
    /// Reserved field, currently unused by any peer.
    pub reserve: String,
    /// Trailing TLV options.
    pub options: Options,
}

impl Submit {
    /// Decode the body of a `Submit` packet.
    pub fn decode(body: &mut impl Buf) -> Result<Self, ProtocolError> {
        if body.remaining() < 3 {
            return Err(ProtocolError::IncompletePacket {
                expected: 3,
                actual: body.remaining(),
            });
        }
        let msg_type = body.get_u8();
        let need_report = body.get_u8();
        let priority = body.get_u8();
        let service_id = read_fixed_str(body, SERVICE_ID_LEN)?;
        let fee_type = read_fixed_str(body, FEE_TYPE_LEN)?;
        let fee_code = read_fixed_str(body, FEE_CODE_LEN)?;
        let fixed_fee = read_fixed_str(body, FIXED_FEE_LEN)?;
        if body.remaining() < 1 {
            return Err(ProtocolError::IncompletePacket {
                expected: 1,
                actual: body.remaining(),
            });
        }
        let msg_format = body.get_u8();
        let valid_time = read_fixed_str(body, VALID_TIME_LEN)?;
        let at_time = read_fixed_str(body, AT_TIME_LEN)?;
        let src_term_id = read_fixed_str(body, TERM_ID_LEN)?;
        let charge_term_id = read_fixed_str(body, TERM_ID_LEN)?;
        if body.remaining() < 1 {
            return Err(ProtocolError::IncompletePacket {
                expected: 1,
                actual: body.remaining(),
            });
        }
        let dest_count = body.get_u8() as usize;
        let mut dest_term_ids = Vec::with_capacity(dest_count);
        for _ in 0..dest_count {
            dest_term_ids.push(read_fixed_str(body, TERM_ID_LEN)?);
        }
        if body.remaining() < 1 {
            return Err(ProtocolError::IncompletePacket {
                expected: 1,
                actual: body.remaining(),
            });
        }
        let msg_length = body.get_u8() as usize;
        let msg_content = Bytes::copy_from_slice(&read_fixed_bytes(body, msg_length)?);
        let reserve = read_fixed_str(body, RESERVE_LEN)?;
        let options = Options::decode(body)?;

        Ok(Self {
            msg_type,
            need_report,
            priority,
            service_id,
            fee_type,
            fee_code,
            fixed_fee,
            msg_format,
            valid_time,
            at_time,
            src_term_id,
            charge_term_id,
            dest_term_ids,
            msg_content,
            reserve,
            options,
        })
    }

    /// Encode the body of a `Submit` packet.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_u8(self.msg_type);
        dst.put_u8(self.need_report);
        dst.put_u8(self.priority);
        write_fixed_str(dst, &self.service_id, SERVICE_ID_LEN);
        write_fixed_str(dst, &self.fee_type, FEE_TYPE_LEN);
        write_fixed_str(dst, &self.fee_code, FEE_CODE_LEN);
        write_fixed_str(dst, &self.fixed_fee, FIXED_FEE_LEN);
        dst.put_u8(self.msg_format);
        write_fixed_str(dst, &self.valid_time, VALID_TIME_LEN);
        write_fixed_str(dst, &self.at_time, AT_TIME_LEN);
        write_fixed_str(dst, &self.src_term_id, TERM_ID_LEN);
        write_fixed_str(dst, &self.charge_term_id, TERM_ID_LEN);
        #[allow(clippy::cast_possible_truncation)]
        dst.put_u8(self.dest_term_ids.len() as u8);
        for term in &self.dest_term_ids {
            write_fixed_str(dst, term, TERM_ID_LEN);
        }
        #[allow(clippy::cast_possible_truncation)]
        dst.put_u8(self.msg_content.len() as u8);
        dst.put_slice(&self.msg_content);
        write_fixed_str(dst, &self.reserve, RESERVE_LEN);
        self.options.encode(dst);
    }

    /// Body length this submit will encode to, for `PacketLength` bookkeeping.
    #[must_use]
    pub fn body_len(&self) -> usize {
        3 + SERVICE_ID_LEN
            + FEE_TYPE_LEN
            + FEE_CODE_LEN
            + FIXED_FEE_LEN
            + 1
            + VALID_TIME_LEN
            + AT_TIME_LEN
            + TERM_ID_LEN * 2
            + 1
            + self.dest_term_ids.len() * TERM_ID_LEN
            + 1
            + self.msg_content.len()
            + RESERVE_LEN
            + self.options.encoded_len()
    }
}

/// `SubmitResp` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResp {
    /// Server-assigned message id for this submit.
    pub msg_id: [u8; MSG_ID_LEN],
    /// Result of the submission.
    pub status: u32,
}

impl SubmitResp {
    /// Decode the body of a `SubmitResp` packet.
    pub fn decode(body: &mut impl Buf) -> Result<Self, ProtocolError> {
        let mut msg_id = [0u8; MSG_ID_LEN];
        msg_id.copy_from_slice(&read_fixed_bytes(body, MSG_ID_LEN)?);
        if body.remaining() < 4 {
            return Err(ProtocolError::IncompletePacket {
                expected: 4,
                actual: body.remaining(),
            });
        }
        let status = body.get_u32();
        Ok(Self { msg_id, status })
    }

    /// Encode the body of a `SubmitResp` packet.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_slice(&self.msg_id);
        dst.put_u32(self.status);
    }
}

/// `Deliver` request: a mobile-originated message, or a delivery report,
/// pushed from the SMSC to the SP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deliver {
    /// The `Submit`-assigned message id this delivery concerns.
    pub msg_id: [u8; MSG_ID_LEN],
    /// Whether `msg_content` carries a delivery report instead of ordinary
    /// mobile-originated content.
    pub is_report: u8,
    /// Content encoding.
    pub msg_format: u8,
    /// Recipient terminal that this message was sent to.
    pub recv_time: String,
    /// Originating terminal (MSISDN) for mobile-originated content.
    pub src_term_id: String,
    /// Destination (SP service number) for mobile-originated content.
    pub dest_term_id: String,
    /// Raw message content.
    pub msg_content: Bytes,
    /// Reserved field, currently unused by any peer.
    pub reserve: String,
    /// Trailing TLV options.
    pub options: Options,
}

impl Deliver {
    /// Decode the body of a `Deliver` packet.
    pub fn decode(body: &mut impl Buf) -> Result<Self, ProtocolError> {
        let mut msg_id = [0u8; MSG_ID_LEN];
        msg_id.copy_from_slice(&read_fixed_bytes(body, MSG_ID_LEN)?);
        if body.remaining() < 2 {
            return Err(ProtocolError::IncompletePacket {
                expected: 2,
                actual: body.remaining(),
            });
        }
        let is_report = body.get_u8();
        let msg_format = body.get_u8();
        let recv_time = read_fixed_str(body, 14)?;
        let src_term_id = read_fixed_str(body, TERM_ID_LEN)?;
        let dest_term_id = read_fixed_str(body, TERM_ID_LEN)?;
        if body.remaining() < 1 {
            return Err(ProtocolError::IncompletePacket {
                expected: 1,
                actual: body.remaining(),
            });
        }
        let msg_length = body.get_u8() as usize;
        let msg_content = Bytes::copy_from_slice(&read_fixed_bytes(body, msg_length)?);
        let reserve = read_fixed_str(body, RESERVE_LEN)?;
        let options = Options::decode(body)?;

        Ok(Self {
            msg_id,
            is_report,
            msg_format,
            recv_time,
            src_term_id,
            dest_term_id,
            msg_content,
            reserve,
            options,
        })
    }

    /// Encode the body of a `Deliver` packet.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_slice(&self.msg_id);
        dst.put_u8(self.is_report);
        dst.put_u8(self.msg_format);
        write_fixed_str(dst, &self.recv_time, 14);
        write_fixed_str(dst, &self.src_term_id, TERM_ID_LEN);
        write_fixed_str(dst, &self.dest_term_id, TERM_ID_LEN);
        #[allow(clippy::cast_possible_truncation)]
        dst.put_u8(self.msg_content.len() as u8);
        dst.put_slice(&self.msg_content);
        write_fixed_str(dst, &self.reserve, RESERVE_LEN);
        self.options.encode(dst);
    }
}

/// `DeliverResp` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverResp {
    /// Echoes the delivered message's id.
    pub msg_id: [u8; MSG_ID_LEN],
    /// Result of accepting the delivery.
    pub status: u32,
}

impl DeliverResp {
    /// Decode the body of a `DeliverResp` packet.
    pub fn decode(body: &mut impl Buf) -> Result<Self, ProtocolError> {
        let mut msg_id = [0u8; MSG_ID_LEN];
        msg_id.copy_from_slice(&read_fixed_bytes(body, MSG_ID_LEN)?);
        if body.remaining() < 4 {
            return Err(ProtocolError::IncompletePacket {
                expected: 4,
                actual: body.remaining(),
            });
        }
        let status = body.get_u32();
        Ok(Self { msg_id, status })
    }

    /// Encode the body of a `DeliverResp` packet.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_slice(&self.msg_id);
        dst.put_u32(self.status);
    }
}

/// `Query` request: ask the SMSC for traffic counters over a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// `YYYYMMDD` day being queried.
    pub time: String,
    /// 0 for total counters, 1 for a specific service id's counters.
    pub query_type: u8,
    /// Service id to filter by when `query_type == 1`.
    pub query_code: String,
}

impl Query {
    /// Decode the body of a `Query` packet.
    pub fn decode(body: &mut impl Buf) -> Result<Self, ProtocolError> {
        let time = read_fixed_str(body, QUERY_TIME_LEN)?;
        if body.remaining() < 1 {
            return Err(ProtocolError::IncompletePacket {
                expected: 1,
                actual: body.remaining(),
            });
        }
        let query_type = body.get_u8();
        let query_code = read_fixed_str(body, QUERY_CODE_LEN)?;
        Ok(Self {
            time,
            query_type,
            query_code,
        })
    }

    /// Encode the body of a `Query` packet.
    pub fn encode(&self, dst: &mut impl BufMut) {
        write_fixed_str(dst, &self.time, QUERY_TIME_LEN);
        dst.put_u8(self.query_type);
        write_fixed_str(dst, &self.query_code, QUERY_CODE_LEN);
    }
}

/// `QueryResp` response: traffic counters for the requested day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryCounters {
    /// Mobile-terminated messages submitted.
    pub mt_tl_msg: u32,
    /// Mobile-terminated users served.
    pub mt_tl_usr: u32,
    /// Mobile-terminated messages successfully delivered.
    pub mt_scs: u32,
    /// Mobile-terminated messages awaiting delivery.
    pub mt_wt: u32,
    /// Mobile-terminated messages that failed delivery.
    pub mt_fl: u32,
    /// Mobile-originated messages successfully received.
    pub mo_scs: u32,
    /// Mobile-originated messages awaiting processing.
    pub mo_wt: u32,
    /// Mobile-originated messages that failed processing.
    pub mo_fl: u32,
}

/// `QueryResp` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResp {
    /// Echoes the queried day.
    pub time: String,
    /// Echoes the query type.
    pub query_type: u8,
    /// Echoes the queried service id.
    pub query_code: String,
    /// The counters themselves.
    pub counters: QueryCounters,
    /// Reserved field, currently unused by any peer.
    pub reserve: String,
}

impl QueryResp {
    /// Decode the body of a `QueryResp` packet.
    pub fn decode(body: &mut impl Buf) -> Result<Self, ProtocolError> {
        let time = read_fixed_str(body, QUERY_TIME_LEN)?;
        if body.remaining() < 1 {
            return Err(ProtocolError::IncompletePacket {
                expected: 1,
                actual: body.remaining(),
            });
        }
        let query_type = body.get_u8();
        let query_code = read_fixed_str(body, QUERY_CODE_LEN)?;
        if body.remaining() < 32 {
            return Err(ProtocolError::IncompletePacket {
                expected: 32,
                actual: body.remaining(),
            });
        }
        let counters = QueryCounters {
            mt_tl_msg: body.get_u32(),
            mt_tl_usr: body.get_u32(),
            mt_scs: body.get_u32(),
            mt_wt: body.get_u32(),
            mt_fl: body.get_u32(),
            mo_scs: body.get_u32(),
            mo_wt: body.get_u32(),
            mo_fl: body.get_u32(),
        };
        let reserve = read_fixed_str(body, RESERVE_LEN)?;
        Ok(Self {
            time,
            query_type,
            query_code,
            counters,
            reserve,
        })
    }

    /// Encode the body of a `QueryResp` packet.
    pub fn encode(&self, dst: &mut impl BufMut) {
        write_fixed_str(dst, &self.time, QUERY_TIME_LEN);
        dst.put_u8(self.query_type);
        write_fixed_str(dst, &self.query_code, QUERY_CODE_LEN);
        dst.put_u32(self.counters.mt_tl_msg);
        dst.put_u32(self.counters.mt_tl_usr);
        dst.put_u32(self.counters.mt_scs);
        dst.put_u32(self.counters.mt_wt);
        dst.put_u32(self.counters.mt_fl);
        dst.put_u32(self.counters.mo_scs);
        dst.put_u32(self.counters.mo_wt);
        dst.put_u32(self.counters.mo_fl);
        write_fixed_str(dst, &self.reserve, RESERVE_LEN);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn login_roundtrip() {
        let login = Login {
            client_id: "10000001".to_string(),
            authenticator_client: [7u8; AUTHENTICATOR_LEN],
            login_mode: 2,
            timestamp: 729_143_522,
            client_version: 0x30,
        };
        let mut buf = BytesMut::new();
        login.encode(&mut buf);
        let mut cursor = buf.freeze();
        assert_eq!(Login::decode(&mut cursor).unwrap(), login);
    }

    #[test]
    fn submit_roundtrip_with_options() {
        let mut options = Options::new();
        options.insert(crate::tlv::Tag::TpUdhi, Bytes::from_static(&[1]));
        let submit = Submit {
            msg_type: 6,
            need_report: 1,
            priority: 0,
            service_id: "test".to_string(),
            fee_type: "01".to_string(),
            fee_code: "000001".to_string(),
            fixed_fee: "000000".to_string(),
            msg_format: 8,
            valid_time: String::new(),
            at_time: String::new(),
            src_term_id: "10000".to_string(),
            charge_term_id: "13800138000".to_string(),
            dest_term_ids: vec!["13800138000".to_string()],
            msg_content: Bytes::from_static(b"hello"),
            reserve: String::new(),
            options,
        };
        let mut buf = BytesMut::new();
        submit.encode(&mut buf);
        assert_eq!(buf.len(), submit.body_len());

        let mut cursor = buf.freeze();
        assert_eq!(Submit::decode(&mut cursor).unwrap(), submit);
    }

    #[test]
    fn query_resp_roundtrip() {
        let resp = QueryResp {
            time: "20260729".to_string(),
            query_type: 0,
            query_code: String::new(),
            counters: QueryCounters {
                mt_tl_msg: 1,
                mt_tl_usr: 2,
                mt_scs: 3,
                mt_wt: 4,
                mt_fl: 5,
                mo_scs: 6,
                mo_wt: 7,
                mo_fl: 8,
            },
            reserve: String::new(),
        };
        let mut buf = BytesMut::new();
        resp.encode(&mut buf);
        let mut cursor = buf.freeze();
        assert_eq!(QueryResp::decode(&mut cursor).unwrap(), resp);
    }
}
