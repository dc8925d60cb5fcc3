//! Read-buffer pooling.
//!
//! Each receive needs a scratch buffer for the packet body; rather than
//! allocate one per call, connections draw from a small shared free list and
//! return it when done, including on every error path — the returned
//! [`Lease`] guarantees that via `Drop`.

use std::sync::{Arc, Mutex};

use bytes::BytesMut;

/// Shared pool of scratch buffers for a connection's receive path.
#[derive(Debug, Clone)]
pub struct BufferPool {
    free: Arc<Mutex<Vec<BytesMut>>>,
    default_capacity: usize,
}

impl BufferPool {
    /// Create a pool whose buffers start at `default_capacity` bytes.
    #[must_use]
    pub fn new(default_capacity: usize) -> Self {
        Self {
            free: Arc::new(Mutex::new(Vec::new())),
            default_capacity,
        }
    }

    /// Draw a buffer from the pool, allocating a fresh one if empty.
    #[must_use]
    pub fn lease(&self) -> Lease {
        let buf = self
            .free
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop()
            .unwrap_or_else(|| BytesMut::with_capacity(self.default_capacity));
        Lease {
            buf: Some(buf),
            pool: self.free.clone(),
        }
    }
}

/// A buffer on loan from a [`BufferPool`]. Returned to the pool on drop.
pub struct Lease {
    buf: Option<BytesMut>,
    pool: Arc<Mutex<Vec<BytesMut>>>,
}

impl std::ops::Deref for Lease {
    type Target = BytesMut;
    fn deref(&self) -> &BytesMut {
        self.buf.as_ref().expect("buffer taken before drop")
    }
}

impl std::ops::DerefMut for Lease {
    fn deref_mut(&mut self) -> &mut BytesMut {
        self.buf.as_mut().expect("buffer taken before drop")
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        if let Some(mut buf) = self.buf.take() {
            buf.clear();
            self.pool
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leased_buffer_returns_to_pool_on_drop() {
        let pool = BufferPool::new(64);
        {
            let mut lease = pool.lease();
            lease.extend_from_slice(b"hello");
        }
        let lease = pool.lease();
        assert!(lease.is_empty(), "returned buffer should have been cleared");
    }
}
