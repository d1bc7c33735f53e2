//! Water-Quality Receiver Node
//!
//! Drains the radio when the receive interrupt fires, decodes the reading
//! triple, renders it to the local display boundary, and forwards it to the
//! configured uplink.

mod config;
mod display;
mod node;

pub use config::ReceiverConfig;
pub use display::{DisplaySink, LogDisplay};
pub use node::{DecodedPacket, ReceiveError, ReceiverNode};

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
