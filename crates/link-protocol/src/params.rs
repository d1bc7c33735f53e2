//! Radio Modulation Parameters
//!
//! Both ends of the link must agree on these; they are loaded from each
//! node's configuration and validated against the modem's hardware ranges.

use crate::error::ParamError;
use serde::{Deserialize, Serialize};

/// LoRa modulation parameters shared by sender and receiver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadioParams {
    /// Spreading factor (7-12, higher trades throughput for range)
    pub spreading_factor: u8,
    /// Coding rate denominator (4/5 .. 4/8)
    pub coding_rate: u8,
    /// Carrier frequency (MHz)
    pub frequency_mhz: f32,
    /// Transmit power (dBm, hardware limit 22)
    pub tx_power_dbm: i8,
}

impl Default for RadioParams {
    fn default() -> Self {
        Self {
            spreading_factor: 7,
            coding_rate: 5,
            frequency_mhz: 915.0,
            tx_power_dbm: 20,
        }
    }
}

impl RadioParams {
    /// Check the parameters against the modem's hardware ranges
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(7..=12).contains(&self.spreading_factor) {
            return Err(ParamError::SpreadingFactor(self.spreading_factor));
        }
        if !(5..=8).contains(&self.coding_rate) {
            return Err(ParamError::CodingRate(self.coding_rate));
        }
        if self.tx_power_dbm > 22 {
            return Err(ParamError::TxPower(self.tx_power_dbm));
        }
        if !(137.0..=1020.0).contains(&self.frequency_mhz) {
            return Err(ParamError::Frequency(self.frequency_mhz));
        }
        Ok(())
    }
}
