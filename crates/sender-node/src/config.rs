//! Sender Configuration
//!
//! Loads sender.toml with serde defaults for every table, so the node runs
//! with the stock probe calibration when no file is present.

use anyhow::{Context, Result};
use link_protocol::RadioParams;
use serde::{Deserialize, Serialize};
use signal_conditioning::{PhCalibration, TdsCalibration};
use std::fs;
use tracing::warn;

/// Complete sender node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderConfig {
    /// Radio modulation parameters (must match the receiver)
    pub radio: RadioParams,
    /// TDS probe calibration
    pub tds: TdsCalibration,
    /// pH probe calibration
    pub ph: PhCalibration,
    /// Analog sampling tick (ms)
    pub sample_interval_ms: u64,
    /// Delay between transmissions (s)
    pub transmit_interval_secs: u64,
    /// Radio init attempts before giving up
    pub init_attempts: u32,
    /// Backoff between init attempts (ms)
    pub init_backoff_ms: u64,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            radio: RadioParams::default(),
            tds: TdsCalibration::default(),
            ph: PhCalibration::default(),
            sample_interval_ms: 40,
            transmit_interval_secs: 30,
            init_attempts: 5,
            init_backoff_ms: 2000,
        }
    }
}

impl SenderConfig {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: SenderConfig = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path, error = %e, "using default sender configuration");
                Self::default()
            }
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        self.radio
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid radio parameters: {}", e))?;

        if self.sample_interval_ms == 0 {
            anyhow::bail!("sample_interval_ms must be greater than 0");
        }
        if self.transmit_interval_secs == 0 {
            anyhow::bail!("transmit_interval_secs must be greater than 0");
        }
        if self.tds.sample_count == 0 {
            anyhow::bail!("tds.sample_count must be greater than 0");
        }
        if self.init_attempts == 0 {
            anyhow::bail!("init_attempts must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(SenderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SenderConfig = toml::from_str(
            r#"
            transmit_interval_secs = 10

            [radio]
            spreading_factor = 9
            coding_rate = 5
            frequency_mhz = 868.0
            tx_power_dbm = 14
            "#,
        )
        .unwrap();

        assert_eq!(config.transmit_interval_secs, 10);
        assert_eq!(config.radio.spreading_factor, 9);
        // Untouched tables keep calibration defaults
        assert_eq!(config.sample_interval_ms, 40);
        assert!((config.tds.calibration_factor - 5.82).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_radio_params_rejected() {
        let mut config = SenderConfig::default();
        config.radio.spreading_factor = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_sample_interval_rejected() {
        let mut config = SenderConfig::default();
        config.sample_interval_ms = 0;
        assert!(config.validate().is_err());
    }
}
