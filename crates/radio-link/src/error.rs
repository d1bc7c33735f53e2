//! Radio Error Types

use thiserror::Error;

/// Errors that can occur while driving the radio
#[derive(Debug, Error)]
pub enum RadioError {
    /// Radio module failed to initialize
    #[error("radio init failed: {0}")]
    Init(String),

    /// Transmit did not complete
    #[error("transmit failed: {0}")]
    Transmit(String),

    /// Receive path failed while draining a packet
    #[error("receive failed: {0}")]
    Receive(String),

    /// Drain attempted with nothing in the receive buffer
    #[error("receive buffer empty")]
    Empty,

    /// Receive operation before reception was armed
    #[error("reception not armed")]
    NotArmed,
}
