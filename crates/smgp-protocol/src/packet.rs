//! [`Packet`]: the sum of all ten packet bodies, and the flat dispatch
//! table that picks a variant from a decoded [`Header`].

use bytes::{Buf, BufMut, BytesMut};

use crate::error::ProtocolError;
use crate::header::{Header, RequestId, HEADER_SIZE};
use crate::packets::{
    Deliver, DeliverResp, Login, LoginResp, Query, QueryResp, Submit, SubmitResp,
};

/// A fully decoded SMGP frame: header plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    /// `Login` request.
    Login(Login),
    /// `Login` response.
    LoginResp(LoginResp),
    /// `Submit` request.
    Submit(Submit),
    /// `Submit` response.
    SubmitResp(SubmitResp),
    /// `Deliver` request.
    Deliver(Deliver),
    /// `Deliver` response.
    DeliverResp(DeliverResp),
    /// Keep-alive probe.
    ActiveTest,
    /// Keep-alive acknowledgement.
    ActiveTestResp,
    /// Graceful teardown request.
    Exit,
    /// Graceful teardown acknowledgement.
    ExitResp,
    /// `Query` request.
    Query(Query),
    /// `Query` response.
    QueryResp(QueryResp),
}

impl Packet {
    /// Which `RequestID` this packet encodes as.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        match self {
            Self::Login(_) => RequestId::Login,
            Self::LoginResp(_) => RequestId::LoginResp,
            Self::Submit(_) => RequestId::Submit,
            Self::SubmitResp(_) => RequestId::SubmitResp,
            Self::Deliver(_) => RequestId::Deliver,
            Self::DeliverResp(_) => RequestId::DeliverResp,
            Self::ActiveTest => RequestId::ActiveTest,
            Self::ActiveTestResp => RequestId::ActiveTestResp,
            Self::Exit => RequestId::Exit,
            Self::ExitResp => RequestId::ExitResp,
            Self::Query(_) => RequestId::Query,
            Self::QueryResp(_) => RequestId::QueryResp,
        }
    }

    /// Dispatch on `header.request_id` and decode the matching body from
    /// the remaining bytes. `body` must contain exactly
    /// `header.body_length()` bytes (the caller is responsible for slicing
    /// the frame to that length before calling this).
    pub fn decode_body(header: &Header, body: &mut impl Buf) -> Result<Self, ProtocolError> {
        let request_id = RequestId::from_u32(header.request_id)?;
        let packet = match request_id {
            RequestId::Login => Self::Login(Login::decode(body)?),
            RequestId::LoginResp => Self::LoginResp(LoginResp::decode(body)?),
            RequestId::Submit => Self::Submit(Submit::decode(body)?),
            RequestId::SubmitResp => Self::SubmitResp(SubmitResp::decode(body)?),
            RequestId::Deliver => Self::Deliver(Deliver::decode(body)?),
            RequestId::DeliverResp => Self::DeliverResp(DeliverResp::decode(body)?),
            RequestId::ActiveTest => Self::ActiveTest,
            RequestId::ActiveTestResp => Self::ActiveTestResp,
            RequestId::Exit => Self::Exit,
            RequestId::ExitResp => Self::ExitResp,
            RequestId::Query => Self::Query(Query::decode(body)?),
            RequestId::QueryResp => Self::QueryResp(QueryResp::decode(body)?),
        };
        if body.has_remaining() {
            return Err(ProtocolError::TrailingBytes(body.remaining()));
        }
        Ok(packet)
    }

    /// Encode this packet as a complete frame (header + body), filling in
    /// `PacketLength` and `RequestID` from the packet's own shape.
    #[must_use]
    pub fn encode(&self, sequence_id: u32) -> BytesMut {
        let mut body = BytesMut::new();
        match self {
            Self::Login(p) => p.encode(&mut body),
            Self::LoginResp(p) => p.encode(&mut body),
            Self::Submit(p) => p.encode(&mut body),
            Self::SubmitResp(p) => p.encode(&mut body),
            Self::Deliver(p) => p.encode(&mut body),
            Self::DeliverResp(p) => p.encode(&mut body),
            Self::Query(p) => p.encode(&mut body),
            Self::QueryResp(p) => p.encode(&mut body),
            Self::ActiveTest | Self::ActiveTestResp | Self::Exit | Self::ExitResp => {}
        }

        let header = Header {
            packet_length: (HEADER_SIZE + body.len()) as u32,
            request_id: self.request_id() as u32,
            sequence_id,
        };

        let mut frame = BytesMut::with_capacity(header.packet_length as usize);
        header.encode(&mut frame);
        frame.put_slice(&body);
        frame
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::packets::QueryCounters;

    #[test]
    fn active_test_round_trips_as_header_only_frame() {
        let encoded = Packet::ActiveTest.encode(5);
        assert_eq!(encoded.len(), HEADER_SIZE);

        let mut cursor = encoded.freeze();
        let header = Header::decode(&mut cursor).unwrap();
        assert_eq!(header.request_id, RequestId::ActiveTest as u32);
        assert_eq!(header.sequence_id, 5);

        let decoded = Packet::decode_body(&header, &mut cursor).unwrap();
        assert_eq!(decoded, Packet::ActiveTest);
    }

    #[test]
    fn exit_uses_its_own_request_id_not_active_test() {
        let encoded = Packet::Exit.encode(1);
        let mut cursor = encoded.freeze();
        let header = Header::decode(&mut cursor).unwrap();
        assert_eq!(header.request_id, RequestId::Exit as u32);
        assert_ne!(header.request_id, RequestId::ActiveTest as u32);

        let resp_encoded = Packet::ExitResp.encode(1);
        let mut resp_cursor = resp_encoded.freeze();
        let resp_header = Header::decode(&mut resp_cursor).unwrap();
        assert_eq!(resp_header.request_id, RequestId::ExitResp as u32);
        assert_ne!(resp_header.request_id, RequestId::ActiveTestResp as u32);
    }

    #[test]
    fn query_resp_round_trips_through_full_frame() {
        let packet = Packet::QueryResp(QueryResp {
            time: "20260729".to_string(),
            query_type: 0,
            query_code: String::new(),
            counters: QueryCounters {
                mt_tl_msg: 10,
                mt_tl_usr: 9,
                mt_scs: 8,
                mt_wt: 7,
                mt_fl: 6,
                mo_scs: 5,
                mo_wt: 4,
                mo_fl: 3,
            },
            reserve: String::new(),
        });
        let encoded = packet.encode(42);
        let mut cursor = encoded.freeze();
        let header = Header::decode(&mut cursor).unwrap();
        assert_eq!(header.sequence_id, 42);
        let decoded = Packet::decode_body(&header, &mut cursor).unwrap();
        assert_eq!(decoded, packet);
    }
}
