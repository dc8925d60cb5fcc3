//! Split I/O connection over an SMGP transport.
//!
//! The transport is split into read and write halves so the session loop,
//! a handler, and the active-test scheduler can all hold a send handle
//! concurrently. Writes are serialized through a shared mutex — SMGP has no
//! per-frame cancellation signal to protect, so the split exists purely to
//! let multiple producers send whole frames without interleaving bytes on
//! the wire.

use std::sync::Arc;
use std::time::Duration;

use smgp_protocol::{Header, Packet, HEADER_SIZE};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::Mutex;

use crate::error::CodecError;
use crate::pool::BufferPool;
use crate::sequence::SequenceSource;
use crate::state::{ConnectionState, StateCell};

/// Default scratch buffer size for decoding packet bodies.
const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// The largest `PacketLength` this connection will accept from its peer.
const DEFAULT_MAX_PACKET_LENGTH: u32 = smgp_protocol::PACKET_LENGTH_MAX;

/// A decoded frame: its header (sequence id, request id) plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The 12-byte header that preceded this packet.
    pub header: Header,
    /// The decoded packet body.
    pub packet: Packet,
}

/// An SMGP connection with split I/O and serialized writes.
pub struct Connection<T>
where
    T: AsyncRead + AsyncWrite,
{
    reader: ReadHalf<T>,
    writer: Arc<Mutex<WriteHalf<T>>>,
    pool: BufferPool,
    sequence: SequenceSource,
    state: Arc<StateCell>,
    max_packet_length: u32,
}

impl<T> Connection<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Split `transport` and wrap it as a connection, spawning its
    /// `SequenceID` generator task.
    #[must_use]
    pub fn new(transport: T) -> Self {
        let (read_half, write_half) = tokio::io::split(transport);
        Self {
            reader: read_half,
            writer: Arc::new(Mutex::new(write_half)),
            pool: BufferPool::new(DEFAULT_BUFFER_CAPACITY),
            sequence: SequenceSource::spawn(),
            state: Arc::new(StateCell::new()),
            max_packet_length: DEFAULT_MAX_PACKET_LENGTH,
        }
    }

    /// Override the accepted `PacketLength` ceiling (default 64 KiB).
    #[must_use]
    pub fn with_max_packet_length(mut self, max: u32) -> Self {
        self.max_packet_length = max;
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Move to a new lifecycle state.
    pub fn set_state(&self, state: ConnectionState) {
        self.state.set(state);
    }

    /// A send-only handle that can be cloned across the session loop, a
    /// handler, and the active-test scheduler.
    #[must_use]
    pub fn sender(&self) -> Sender<T> {
        Sender {
            writer: Arc::clone(&self.writer),
            state: Arc::clone(&self.state),
        }
    }

    /// Next `SequenceID` for an outbound request originating on this
    /// connection (responses instead echo the request's sequence id).
    pub async fn next_sequence_id(&mut self) -> Result<u32, CodecError> {
        self.sequence.next().await.ok_or(CodecError::AlreadyClosed)
    }

    /// Read one frame, applying `read_timeout` to the header read only —
    /// once a header has arrived the body is assumed to follow promptly and
    /// is read without a deadline, matching the reference implementation's
    /// "arm the deadline, read header, disarm, read body" sequencing.
    pub async fn recv(&mut self, read_timeout: Option<Duration>) -> Result<Frame, CodecError> {
        if self.state.get() == ConnectionState::Closed {
            return Err(CodecError::AlreadyClosed);
        }

        let mut header_buf = [0u8; HEADER_SIZE];
        let read = self.reader.read_exact(&mut header_buf);
        match read_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, read).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    return Err(CodecError::ConnectionClosed);
                }
                Ok(Err(e)) => return Err(CodecError::Io(e)),
                Err(_) => return Err(CodecError::ReadTimeout),
            },
            None => match read.await {
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    return Err(CodecError::ConnectionClosed);
                }
                Err(e) => return Err(CodecError::Io(e)),
            },
        }

        let mut header_cursor: &[u8] = &header_buf;
        let header = Header::decode(&mut header_cursor)?;
        header
            .check_length(self.max_packet_length)
            .map_err(CodecError::Protocol)?;

        let body_len = header.body_length();
        let mut lease = self.pool.lease();
        lease.resize(body_len, 0);
        self.reader.read_exact(&mut lease).await?;

        let mut body_cursor: &[u8] = &lease;
        let packet = Packet::decode_body(&header, &mut body_cursor).map_err(CodecError::Protocol)?;

        Ok(Frame { header, packet })
    }

    /// Send a packet, assigning it `sequence_id`.
    pub async fn send(&self, packet: &Packet, sequence_id: u32) -> Result<(), CodecError> {
        self.sender().send(packet, sequence_id).await
    }

    /// Mark the connection closed, stop the `SequenceID` generator task, and
    /// shut down the write half of the socket. Idempotent; subsequent sends
    /// fail with [`CodecError::AlreadyClosed`], but this method itself never
    /// errors.
    pub async fn close(&mut self) {
        self.state.set(ConnectionState::Closed);
        self.sequence.close();
        let mut writer = self.writer.lock().await;
        let _ = writer.shutdown().await;
    }
}

/// A cloneable send-only handle sharing a connection's write mutex.
#[derive(Clone)]
pub struct Sender<T>
where
    T: AsyncRead + AsyncWrite,
{
    writer: Arc<Mutex<WriteHalf<T>>>,
    state: Arc<StateCell>,
}

impl<T> Sender<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Encode `packet` and write the whole frame under the write mutex,
    /// flushing before releasing it.
    pub async fn send(&self, packet: &Packet, sequence_id: u32) -> Result<(), CodecError> {
        if self.state.get() == ConnectionState::Closed {
            return Err(CodecError::AlreadyClosed);
        }
        let frame = packet.encode(sequence_id);
        let mut writer = self.writer.lock().await;
        writer.write_all(&frame).await?;
        writer.flush().await?;
        Ok(())
    }
}
