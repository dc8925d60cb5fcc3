//! # smgp-protocol
//!
//! Pure implementation of the SMGP v3.0 (Short Message Gateway Protocol)
//! wire format used between SMS service providers and SMSC gateways.
//!
//! This crate provides `no_std` compatible packet structures and
//! serialization for the header, all ten packet bodies, and TLV options.
//!
//! ## Features
//!
//! - `std` (default): Enable standard library support.
//! - `alloc`: Enable allocation without full std (requires the `alloc` crate).
//! - `text` (default, implies `std`): Text transcoding (UCS-2/GB18030),
//!   the authenticator digest, and `MsgID` packing. Kept optional so the
//!   header/packet codecs stay usable with nothing beyond `bytes`.
//!
//! ## Design Philosophy
//!
//! This crate is intentionally IO-agnostic. It contains no networking logic
//! and makes no assumptions about the async runtime. `smgp-codec` builds on
//! this foundation to provide async framing.
//!
//! ## Example
//!
//! ```rust
//! use smgp_protocol::{Header, RequestId};
//!
//! let header = Header::new(RequestId::ActiveTest as u32, 1);
//! assert_eq!(header.request_id, RequestId::ActiveTest as u32);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "text")]
pub mod delivery_report;
pub mod error;
pub mod header;
pub mod octet;
pub mod packet;
pub mod packets;
pub mod prelude;
pub mod status;
#[cfg(feature = "text")]
pub mod text;
pub mod tlv;
pub mod version;

pub use error::ProtocolError;
pub use header::{Header, RequestId, HEADER_SIZE, PACKET_LENGTH_MAX, PACKET_LENGTH_MIN};
pub use packet::Packet;
pub use packets::{
    Deliver, DeliverResp, Login, LoginResp, Query, QueryCounters, QueryResp, Submit, SubmitResp,
};
pub use status::Status;
pub use tlv::{Options, Tag};
pub use version::{IsReport, LoginMode, MsgFormat, MsgType, NeedReport, VERSION};

#[cfg(feature = "text")]
pub use text::{
    client_authenticator, format_timestamp, pack_msg_id, server_authenticator, Clock, MsgId,
    SystemClock,
};

#[cfg(feature = "text")]
pub use delivery_report::{DeliveryReport, DeliveryReportFormat};
