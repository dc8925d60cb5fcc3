//! Request dispatch: the decoded inbound packet, a pre-built response
//! skeleton, and the pluggable chain of handlers that fill it in.

use async_trait::async_trait;
use smgp_protocol::{
    DeliverResp, Header, LoginResp, Packet, QueryCounters, QueryResp, Status, SubmitResp,
};

use crate::error::Error;

/// A decoded inbound frame.
#[derive(Debug, Clone)]
pub struct Request {
    /// The frame's header (sequence id, request id, length).
    pub header: Header,
    /// The decoded packet body.
    pub packet: Packet,
}

/// The response a handler chain is building for a [`Request`].
///
/// Request variants get a pre-built, default-initialized response
/// skeleton with the correlation sequence id already set; inbound response
/// packets (e.g. an `ActiveTestResp` receipt) have no skeleton, since
/// nothing is written back for them.
#[derive(Debug, Clone)]
pub struct Response {
    packet: Option<Packet>,
    sequence_id: u32,
}

impl Response {
    fn new(packet: Option<Packet>, sequence_id: u32) -> Self {
        Self {
            packet,
            sequence_id,
        }
    }

    /// The packet currently queued to be written back, if any.
    #[must_use]
    pub fn packet(&self) -> Option<&Packet> {
        self.packet.as_ref()
    }

    /// Mutable access to the queued packet, for a handler to fill in
    /// fields (e.g. `SubmitResp.msg_id`).
    pub fn packet_mut(&mut self) -> Option<&mut Packet> {
        self.packet.as_mut()
    }

    /// Replace the queued packet outright, or pass `None` to suppress the
    /// write entirely.
    pub fn set_packet(&mut self, packet: Option<Packet>) {
        self.packet = packet;
    }

    /// The correlation sequence id this response will be sent with.
    #[must_use]
    pub const fn sequence_id(&self) -> u32 {
        self.sequence_id
    }
}

/// Build the default response skeleton for an inbound frame, per the
/// request/response pairing in the packet registry. Returns `None` for
/// frames that are themselves responses — there is nothing to write back.
#[must_use]
pub fn response_skeleton(header: &Header, packet: &Packet) -> Option<Packet> {
    let resp = match packet {
        Packet::Login(_) => Packet::LoginResp(LoginResp {
            status: Status::OK.value(),
            authenticator_server: [0u8; 16],
            server_version: smgp_protocol::VERSION,
        }),
        Packet::Submit(_) => Packet::SubmitResp(SubmitResp {
            msg_id: [0u8; 10],
            status: Status::OK.value(),
        }),
        Packet::Deliver(deliver) => Packet::DeliverResp(DeliverResp {
            msg_id: deliver.msg_id,
            status: Status::OK.value(),
        }),
        Packet::ActiveTest => Packet::ActiveTestResp,
        Packet::Exit => Packet::ExitResp,
        Packet::Query(query) => Packet::QueryResp(QueryResp {
            time: query.time.clone(),
            query_type: query.query_type,
            query_code: query.query_code.clone(),
            counters: QueryCounters {
                mt_tl_msg: 0,
                mt_tl_usr: 0,
                mt_scs: 0,
                mt_wt: 0,
                mt_fl: 0,
                mo_scs: 0,
                mo_wt: 0,
                mo_fl: 0,
            },
            reserve: String::new(),
        }),
        Packet::LoginResp(_)
        | Packet::SubmitResp(_)
        | Packet::DeliverResp(_)
        | Packet::ActiveTestResp
        | Packet::ExitResp
        | Packet::QueryResp(_) => return None,
    };
    Some(resp)
}

impl Response {
    /// Build the skeleton response for `request`, or `None` if `request`
    /// is itself a response packet.
    #[must_use]
    pub fn skeleton_for(request: &Request) -> Option<Self> {
        response_skeleton(&request.header, &request.packet)
            .map(|packet| Self::new(Some(packet), request.header.sequence_id))
    }
}

/// A single step in a connection's request-handling chain.
///
/// Handlers are tried in registration order. A handler that does not
/// recognize `req.packet`'s type should return `Ok(true)` ("pass") without
/// modifying `resp`. Any handler that returns `Ok(false)` or an `Err` halts
/// the chain; the server still writes whatever is in `resp` before
/// deciding whether to close the connection.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Inspect `req` and optionally update `resp`. Returns whether the
    /// chain should continue to the next handler.
    async fn serve(&self, resp: &mut Response, req: &Request) -> Result<bool, Error>;
}

/// An ordered sequence of [`Handler`]s tried for every inbound frame.
pub struct HandlerChain {
    handlers: Vec<Box<dyn Handler>>,
}

impl HandlerChain {
    /// Build a chain from an ordered list of handlers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoHandlers`] if `handlers` is empty.
    pub fn new(handlers: Vec<Box<dyn Handler>>) -> Result<Self, Error> {
        if handlers.is_empty() {
            return Err(Error::NoHandlers);
        }
        Ok(Self { handlers })
    }

    /// Run every handler against `req`/`resp` in order, stopping at the
    /// first one that errors or returns `false`.
    pub async fn serve(&self, resp: &mut Response, req: &Request) -> Result<(), Error> {
        for handler in &self.handlers {
            match handler.serve(resp, req).await {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
