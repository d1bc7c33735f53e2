//! Receiver Configuration
//!
//! Loads receiver.toml; the uplink API key can be overridden from the
//! environment so it stays out of the config file.

use anyhow::{Context, Result};
use link_protocol::RadioParams;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::warn;
use uplink::UplinkConfig;

/// Complete receiver node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Radio modulation parameters (must match the sender)
    pub radio: RadioParams,
    /// Uplink endpoint configuration
    pub uplink: UplinkConfig,
    /// Delay after a successful forward (s)
    pub forward_interval_secs: u64,
    /// Backoff after a receive or decode failure (s)
    pub decode_backoff_secs: u64,
    /// Idle poll interval while waiting for the flag (ms)
    pub poll_interval_ms: u64,
    /// Radio init attempts before giving up
    pub init_attempts: u32,
    /// Backoff between init attempts (ms)
    pub init_backoff_ms: u64,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            radio: RadioParams::default(),
            uplink: UplinkConfig::default(),
            forward_interval_secs: 20,
            decode_backoff_secs: 5,
            poll_interval_ms: 50,
            init_attempts: 5,
            init_backoff_ms: 2000,
        }
    }
}

impl ReceiverConfig {
    /// Load configuration from file
    ///
    /// Environment variables override config file values:
    /// - UPLINK_API_KEY: Override the uplink API key
    pub fn load(path: &str) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let mut config: ReceiverConfig = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        if let Ok(key) = std::env::var("UPLINK_API_KEY") {
            tracing::info!("Using UPLINK_API_KEY from environment");
            config.uplink.api_key = Some(key);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path, error = %e, "using default receiver configuration");
                Self::default()
            }
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        self.radio
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid radio parameters: {}", e))?;

        if !self.uplink.endpoint.starts_with("http://")
            && !self.uplink.endpoint.starts_with("https://")
        {
            anyhow::bail!(
                "Invalid uplink endpoint: {} (must start with http:// or https://)",
                self.uplink.endpoint
            );
        }
        if self.uplink.timeout_ms == 0 {
            anyhow::bail!("uplink.timeout_ms must be greater than 0");
        }
        if self.poll_interval_ms == 0 {
            anyhow::bail!("poll_interval_ms must be greater than 0");
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
        assert!(ReceiverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_cadences_from_toml() {
        let config: ReceiverConfig = toml::from_str(
            r#"
            forward_interval_secs = 60
            decode_backoff_secs = 2

            [uplink]
            endpoint = "https://api.example.com/update"
            api_key = "abc123"
            timeout_ms = 3000
            mode = "keyed_get"
            "#,
        )
        .unwrap();

        assert_eq!(config.forward_interval_secs, 60);
        assert_eq!(config.decode_backoff_secs, 2);
        assert_eq!(config.uplink.mode, uplink::UplinkMode::KeyedGet);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_http_endpoint_rejected() {
        let mut config = ReceiverConfig::default();
        config.uplink.endpoint = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }
}
