//! Water-Quality Sender Node
//!
//! Samples the TDS, pH, and temperature probes, conditions the signals, and
//! transmits one reading per reporting tick over the radio link.

mod acquisition;
mod config;
mod node;
mod probes;

pub use acquisition::AcquisitionLoop;
pub use config::SenderConfig;
pub use node::SenderNode;
pub use probes::{AdcSource, MockPhProbe, MockTdsProbe, MockThermometer, TemperatureProbe};

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
