//! Per-connection `SequenceID` generation.
//!
//! A background task owns the counter and feeds values through a bounded
//! channel; callers `await` the next value instead of taking a lock,
//! mirroring the reference implementation's generator goroutine. The
//! initial value is randomized per connection (the reference implementation
//! was inconsistent about this — sometimes zero, sometimes random — this
//! always randomizes, closing the gap).

use tokio::sync::mpsc;

/// Handle for pulling the next `SequenceID` for a connection.
#[derive(Debug)]
pub struct SequenceSource {
    rx: mpsc::Receiver<u32>,
}

impl SequenceSource {
    /// Spawn the generator task and return a handle to its output.
    #[must_use]
    pub fn spawn() -> Self {
        let start = rand::random::<u32>();
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(async move {
            let mut next = start;
            loop {
                if tx.send(next).await.is_err() {
                    return;
                }
                next = next.wrapping_add(1);
            }
        });
        Self { rx }
    }

    /// Await the next sequence id. Returns `None` once the generator task
    /// has been dropped (the connection is closing).
    pub async fn next(&mut self) -> Option<u32> {
        self.rx.recv().await
    }

    /// Stop the generator task. Closing the receiver makes the task's next
    /// `tx.send` fail, so it exits without needing to be dropped itself.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn yields_strictly_increasing_values_after_the_first() {
        let mut source = SequenceSource::spawn();
        let first = source.next().await.unwrap();
        let second = source.next().await.unwrap();
        assert_eq!(second, first.wrapping_add(1));
    }
}
