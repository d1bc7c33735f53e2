//! Sensor Reading Triple

use serde::{Deserialize, Serialize};

/// One reporting tick's worth of conditioned sensor values
///
/// Created once per sender tick, immutable after creation, consumed by the
/// packet encoder. pH is kept as a float; the integer truncation seen on
/// some probes loses real precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Water temperature (°C)
    pub temperature: f32,
    /// pH (unitless, typically 0-14)
    pub ph: f32,
    /// Total dissolved solids (ppm)
    pub tds: f32,
}

impl Reading {
    /// Create a new reading
    pub fn new(temperature: f32, ph: f32, tds: f32) -> Self {
        Self {
            temperature,
            ph,
            tds,
        }
    }
}
