//! Analog Acquisition Loop
//!
//! Keeps the sample buffer fed at the sampling cadence, decoupled from the
//! reporting tick. The gate is a monotonic clock comparison, so a poll never
//! blocks the reporting or transmit paths.

use crate::probes::AdcSource;
use sample_buffer::SampleBuffer;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::trace;

/// Periodic sampler for one analog channel
pub struct AcquisitionLoop<S: AdcSource> {
    source: S,
    buffer: Arc<SampleBuffer>,
    interval: Duration,
    last_sample: Option<Instant>,
}

impl<S: AdcSource> AcquisitionLoop<S> {
    /// Create a sampler; the first poll takes a sample immediately
    pub fn new(source: S, buffer: Arc<SampleBuffer>, interval: Duration) -> Self {
        Self {
            source,
            buffer,
            interval,
            last_sample: None,
        }
    }

    /// Take one sample if the interval has elapsed; never blocks
    ///
    /// Returns whether a sample was stored.
    pub fn poll(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_sample {
            if now.duration_since(last) < self.interval {
                return false;
            }
        }
        self.last_sample = Some(now);

        let sample = self.source.read();
        self.buffer.push(sample);
        trace!(sample, "tds sample stored");
        true
    }

    /// Run as a dedicated task, ticking at the sampling interval
    pub async fn run(mut self) {
        let mut tick = tokio::time::interval(self.interval);
        loop {
            tick.tick().await;
            self.poll(Instant::now());
        }
    }
}
