//! Probe Source Abstractions
//!
//! The hardware ADC channels and the temperature bus sit behind these
//! traits. The mock implementations generate deterministic values so the
//! node runs without probes attached.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A raw analog channel (12-bit counts)
///
/// Out-of-range or noisy counts are not rejected here; the median filter is
/// the only defense against spikes.
pub trait AdcSource {
    /// Read one raw sample
    fn read(&mut self) -> u16;
}

/// The water temperature probe
pub trait TemperatureProbe {
    /// Read the current temperature (°C)
    fn read_celsius(&mut self) -> f32;
}

fn mock_hash(seed: u64, tick: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    tick.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic TDS channel: counts for a mid-range nutrient solution
#[derive(Debug, Default)]
pub struct MockTdsProbe {
    tick: u64,
}

impl MockTdsProbe {
    /// Create a mock TDS channel
    pub fn new() -> Self {
        Self::default()
    }
}

impl AdcSource for MockTdsProbe {
    fn read(&mut self) -> u16 {
        self.tick += 1;
        // ~150-220 counts -> ~0.12-0.18 V at 3.3 V ref
        150 + (mock_hash(0x7d5, self.tick) % 70) as u16
    }
}

/// Deterministic pH channel: counts around pH 7
#[derive(Debug, Default)]
pub struct MockPhProbe {
    tick: u64,
}

impl MockPhProbe {
    /// Create a mock pH channel
    pub fn new() -> Self {
        Self::default()
    }
}

impl AdcSource for MockPhProbe {
    fn read(&mut self) -> u16 {
        self.tick += 1;
        // ~2600-2720 counts -> ~3.2-3.3 V -> pH ~6.6-7.4
        2600 + (mock_hash(0x9c4, self.tick) % 120) as u16
    }
}

/// Deterministic thermometer hovering around room temperature
#[derive(Debug, Default)]
pub struct MockThermometer {
    tick: u64,
}

impl MockThermometer {
    /// Create a mock thermometer
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemperatureProbe for MockThermometer {
    fn read_celsius(&mut self) -> f32 {
        self.tick += 1;
        24.0 + (mock_hash(0x7e9, self.tick) % 30) as f32 / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_tds_counts_in_range() {
        let mut probe = MockTdsProbe::new();
        for _ in 0..100 {
            let counts = probe.read();
            assert!((150..220).contains(&counts));
        }
    }

    #[test]
    fn test_mock_ph_counts_in_range() {
        let mut probe = MockPhProbe::new();
        for _ in 0..100 {
            let counts = probe.read();
            assert!((2600..2720).contains(&counts));
        }
    }

    #[test]
    fn test_mock_thermometer_is_deterministic() {
        let mut a = MockThermometer::new();
        let mut b = MockThermometer::new();
        for _ in 0..10 {
            assert_eq!(a.read_celsius(), b.read_celsius());
        }
    }

    #[test]
    fn test_mock_temperature_plausible() {
        let mut probe = MockThermometer::new();
        let t = probe.read_celsius();
        assert!((24.0..27.0).contains(&t));
    }
}
