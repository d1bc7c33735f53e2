//! Sender Reporting Loop

use crate::config::SenderConfig;
use crate::probes::{AdcSource, TemperatureProbe};
use link_protocol::{encode, Reading};
use radio_link::{Radio, RadioError};
use sample_buffer::SampleBuffer;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The sender's reporting side: conditions the buffered samples into a
/// reading every transmit tick and hands it to the radio
pub struct SenderNode<R, T, P>
where
    R: Radio,
    T: TemperatureProbe,
    P: AdcSource,
{
    config: SenderConfig,
    radio: R,
    thermometer: T,
    ph_probe: P,
    buffer: Arc<SampleBuffer>,
}

impl<R, T, P> SenderNode<R, T, P>
where
    R: Radio,
    T: TemperatureProbe,
    P: AdcSource,
{
    /// Create a sender node around an initialized radio
    pub fn new(
        config: SenderConfig,
        mut radio: R,
        thermometer: T,
        ph_probe: P,
        buffer: Arc<SampleBuffer>,
    ) -> Result<Self, RadioError> {
        radio.configure(&config.radio)?;
        Ok(Self {
            config,
            radio,
            thermometer,
            ph_probe,
            buffer,
        })
    }

    /// Condition one reading from the current probe state
    pub fn build_reading(&mut self) -> Reading {
        let temperature = self.thermometer.read_celsius();

        let snapshot = self.buffer.snapshot();
        let median_counts = signal_conditioning::median(&snapshot);
        let tds = self.config.tds.convert(median_counts, temperature);

        let ph = self.config.ph.convert(self.ph_probe.read());

        debug!(
            median_counts,
            raw_voltage = tds.raw_voltage,
            ec_us_cm = tds.ec_us_cm,
            "tds sample conditioned"
        );

        Reading::new(temperature, ph, tds.tds_ppm)
    }

    /// Build, encode, and transmit one reading
    ///
    /// Fire-and-forget: a transmit failure is logged and the reading lost.
    pub fn report_once(&mut self) -> Reading {
        let reading = self.build_reading();
        let frame = encode(&reading);

        match self.radio.transmit(frame.as_bytes()) {
            Ok(()) => info!(%frame, "reading transmitted"),
            Err(e) => warn!(error = %e, "transmit failed, reading dropped"),
        }

        reading
    }

    /// Run the reporting loop at the transmit cadence
    pub async fn run(mut self) {
        let delay = Duration::from_secs(self.config.transmit_interval_secs);
        info!(
            interval_secs = self.config.transmit_interval_secs,
            "sender reporting loop started"
        );

        loop {
            if !self.buffer.is_warm() {
                debug!(
                    written = self.buffer.total_written(),
                    capacity = self.buffer.capacity(),
                    "sample buffer still warming up"
                );
            }
            self.report_once();
            tokio::time::sleep(delay).await;
        }
    }
}
