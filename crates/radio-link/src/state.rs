//! Receive State Machine
//!
//! Drives the interrupt-flagged drain cycle on the receiver: the interrupt
//! only raises the flag, the main loop does all data movement.

use crate::driver::{Radio, ReceivedPacket};
use crate::error::RadioError;
use crate::flag::PacketFlag;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Receiver link states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkState {
    /// Reception not yet armed
    #[default]
    Idle,
    /// Armed, awaiting a frame
    Receiving,
    /// Interrupt has flagged a frame; loop has not drained it yet
    FlagPending,
    /// Loop is reading the radio with interrupts suppressed
    Draining,
}

/// The receiver's flag-drain-rearm cycle
pub struct ReceiveStateMachine<R: Radio> {
    radio: R,
    flag: Arc<PacketFlag>,
    state: LinkState,
}

impl<R: Radio> ReceiveStateMachine<R> {
    /// Wrap a radio driver; reception stays unarmed until `arm`
    pub fn new(radio: R) -> Self {
        let flag = radio.packet_flag();
        Self {
            radio,
            flag,
            state: LinkState::Idle,
        }
    }

    /// Arm continuous reception
    pub fn arm(&mut self) -> Result<(), RadioError> {
        self.radio.start_receive()?;
        self.state = LinkState::Receiving;
        debug!("reception armed");
        Ok(())
    }

    /// Current link state, folding in the pending interrupt flag
    pub fn state(&self) -> LinkState {
        if self.state == LinkState::Receiving && self.flag.is_pending() {
            LinkState::FlagPending
        } else {
            self.state
        }
    }

    /// The interrupt flag shared with the radio driver
    pub fn flag(&self) -> Arc<PacketFlag> {
        Arc::clone(&self.flag)
    }

    /// Drain one pending frame, if any
    ///
    /// Consumes the flag, suppresses the interrupt side for the duration of
    /// the radio read (a frame landing in that window is dropped), then
    /// resumes and re-arms. Returns `Ok(None)` when no frame was pending.
    pub fn try_drain(&mut self) -> Result<Option<ReceivedPacket>, RadioError> {
        if self.state == LinkState::Idle {
            return Err(RadioError::NotArmed);
        }
        if !self.flag.take() {
            return Ok(None);
        }

        self.flag.suppress();
        self.state = LinkState::Draining;

        let packet = self.radio.read_packet();

        // Resume and re-arm even when the read failed, so one bad frame
        // cannot wedge reception
        self.flag.resume();
        let rearm = self.radio.start_receive();
        self.state = LinkState::Receiving;

        let packet = packet?;
        rearm?;
        debug!(bytes = packet.payload.len(), "frame drained");
        Ok(Some(packet))
    }
}
