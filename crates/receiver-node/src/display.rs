//! Local Display Boundary
//!
//! The panel hardware is outside the core; the node only needs somewhere to
//! hand each decoded reading.

use link_protocol::Reading;
use tracing::info;

/// A render target for decoded readings
pub trait DisplaySink {
    /// Render one reading
    fn show(&mut self, reading: &Reading);
}

/// Writes readings to the log instead of a panel
#[derive(Debug, Default)]
pub struct LogDisplay;

impl DisplaySink for LogDisplay {
    fn show(&mut self, reading: &Reading) {
        info!(
            temperature = reading.temperature,
            ph = reading.ph,
            tds = reading.tds,
            "reading"
        );
    }
}
