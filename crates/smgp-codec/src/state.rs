//! Connection state machine.

use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle state of a connection, per the protocol's connection state
/// machine: a socket starts `Connected`, becomes `AuthOk` once `Login`
/// succeeds, and `Closed` once either side tears it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    /// TCP connected, `Login` not yet completed.
    Connected = 0,
    /// `Login` succeeded; `Submit`/`Deliver` traffic is permitted.
    AuthOk = 1,
    /// The connection has been torn down.
    Closed = 2,
}

impl ConnectionState {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::AuthOk,
            2 => Self::Closed,
            _ => Self::Connected,
        }
    }
}

/// Atomically-updated connection state shared between a connection and its
/// handles.
#[derive(Debug, Default)]
pub struct StateCell(AtomicU8);

impl StateCell {
    /// Start in the `Connected` state.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU8::new(ConnectionState::Connected as u8))
    }

    /// Read the current state.
    #[must_use]
    pub fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Move to a new state.
    pub fn set(&self, state: ConnectionState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_connected_and_transitions() {
        let cell = StateCell::new();
        assert_eq!(cell.get(), ConnectionState::Connected);
        cell.set(ConnectionState::AuthOk);
        assert_eq!(cell.get(), ConnectionState::AuthOk);
        cell.set(ConnectionState::Closed);
        assert_eq!(cell.get(), ConnectionState::Closed);
    }
}
