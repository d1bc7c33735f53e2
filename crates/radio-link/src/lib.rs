//! Radio Link
//!
//! The seam between the nodes and the long-range radio hardware: a driver
//! trait with an in-memory mock pair, the interrupt-to-loop packet flag, and
//! the receiver's drain state machine.

mod driver;
mod error;
mod flag;
mod state;

pub use driver::{init_with_retry, MockRadio, Radio, ReceivedPacket};
pub use error::RadioError;
pub use flag::PacketFlag;
pub use state::{LinkState, ReceiveStateMachine};
