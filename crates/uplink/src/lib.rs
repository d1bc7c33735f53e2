//! Reading Uplink Forwarders
//!
//! Pushes each decoded reading to a remote HTTP endpoint. Two wire shapes
//! cover the deployed services: a JSON POST and a key-based GET. Both are
//! fire-and-forget: no retry, no auth headers, and a failed forward drops
//! the reading.

use link_protocol::Reading;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Uplink error types
#[derive(Debug, Error)]
pub enum UplinkError {
    /// Transport-level failure (connect, timeout, DNS)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("endpoint returned status {0}")]
    Status(reqwest::StatusCode),

    /// Key-based forwarding selected without an API key
    #[error("keyed uplink requires an api_key")]
    MissingApiKey,
}

/// Which wire shape the remote service expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UplinkMode {
    /// One JSON object POSTed per reading
    JsonPost,
    /// GET with api_key and field1..field3 query parameters
    KeyedGet,
}

/// Uplink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UplinkConfig {
    /// Remote endpoint URL
    pub endpoint: String,
    /// API key for the keyed GET shape
    pub api_key: Option<String>,
    /// Request timeout; bounds how long a stalled uplink can delay the
    /// next receive window
    pub timeout_ms: u64,
    /// Wire shape
    pub mode: UplinkMode,
}

impl Default for UplinkConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/telemetry".to_string(),
            api_key: None,
            timeout_ms: 5000,
            mode: UplinkMode::JsonPost,
        }
    }
}

/// JSON payload shape expected by the remote service
#[derive(Debug, Serialize)]
struct TelemetryPayload {
    temperatura: f32,
    ph: f32,
    tds: f32,
}

impl TelemetryPayload {
    fn from_reading(reading: &Reading) -> Self {
        Self {
            temperatura: round2(reading.temperature),
            ph: round2(reading.ph),
            tds: round2(reading.tds),
        }
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// A destination for decoded readings
pub trait UplinkForwarder {
    /// Forward one reading; errors are recoverable and the reading is lost
    fn forward(
        &self,
        reading: &Reading,
    ) -> impl std::future::Future<Output = Result<(), UplinkError>> + Send;
}

/// POSTs one JSON object per reading
pub struct JsonPostForwarder {
    endpoint: String,
    client: Client,
}

impl JsonPostForwarder {
    /// Build a forwarder with the configured request timeout
    pub fn new(config: &UplinkConfig) -> Result<Self, UplinkError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            client,
        })
    }
}

impl UplinkForwarder for JsonPostForwarder {
    async fn forward(&self, reading: &Reading) -> Result<(), UplinkError> {
        let payload = TelemetryPayload::from_reading(reading);
        debug!(endpoint = %self.endpoint, "posting reading");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UplinkError::Status(status));
        }

        info!(
            temperatura = payload.temperatura,
            ph = payload.ph,
            tds = payload.tds,
            "reading forwarded"
        );
        Ok(())
    }
}

/// GETs with api_key / field1..field3 query parameters
pub struct KeyedGetForwarder {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl KeyedGetForwarder {
    /// Build a forwarder; fails when no API key is configured
    pub fn new(config: &UplinkConfig) -> Result<Self, UplinkError> {
        let api_key = config.api_key.clone().ok_or(UplinkError::MissingApiKey)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key,
            client,
        })
    }
}

impl UplinkForwarder for KeyedGetForwarder {
    async fn forward(&self, reading: &Reading) -> Result<(), UplinkError> {
        debug!(endpoint = %self.endpoint, "keyed get for reading");

        let field1 = format!("{:.2}", reading.temperature);
        let field2 = format!("{:.2}", reading.ph);
        let field3 = format!("{:.2}", reading.tds);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("field1", field1.as_str()),
                ("field2", field2.as_str()),
                ("field3", field3.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UplinkError::Status(status));
        }

        info!("reading forwarded");
        Ok(())
    }
}

/// Runtime-selected forwarder
pub enum AnyForwarder {
    JsonPost(JsonPostForwarder),
    KeyedGet(KeyedGetForwarder),
}

impl AnyForwarder {
    /// Build the forwarder the configuration asks for
    pub fn from_config(config: &UplinkConfig) -> Result<Self, UplinkError> {
        match config.mode {
            UplinkMode::JsonPost => JsonPostForwarder::new(config).map(Self::JsonPost),
            UplinkMode::KeyedGet => KeyedGetForwarder::new(config).map(Self::KeyedGet),
        }
    }
}

impl UplinkForwarder for AnyForwarder {
    async fn forward(&self, reading: &Reading) -> Result<(), UplinkError> {
        match self {
            AnyForwarder::JsonPost(f) => f.forward(reading).await,
            AnyForwarder::KeyedGet(f) => f.forward(reading).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape_and_rounding() {
        let reading = Reading::new(23.456, 7.204, 345.098);
        let payload = TelemetryPayload::from_reading(&reading);
        let value = serde_json::to_value(&payload).unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!((object["temperatura"].as_f64().unwrap() - 23.46).abs() < 1e-3);
        assert!((object["ph"].as_f64().unwrap() - 7.2).abs() < 1e-3);
        assert!((object["tds"].as_f64().unwrap() - 345.1).abs() < 1e-3);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(2.676), 2.68);
        assert_eq!(round2(7.2), 7.2);
        assert_eq!(round2(-0.456), -0.46);
    }

    #[test]
    fn test_keyed_get_requires_api_key() {
        let config = UplinkConfig {
            mode: UplinkMode::KeyedGet,
            ..Default::default()
        };
        assert!(matches!(
            KeyedGetForwarder::new(&config),
            Err(UplinkError::MissingApiKey)
        ));
    }

    #[test]
    fn test_from_config_selects_mode() {
        let config = UplinkConfig::default();
        assert!(matches!(
            AnyForwarder::from_config(&config),
            Ok(AnyForwarder::JsonPost(_))
        ));

        let config = UplinkConfig {
            mode: UplinkMode::KeyedGet,
            api_key: Some("abc123".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            AnyForwarder::from_config(&config),
            Ok(AnyForwarder::KeyedGet(_))
        ));
    }

    #[test]
    fn test_mode_parses_from_config_text() {
        let mode: UplinkMode = serde_json::from_str("\"keyed_get\"").unwrap();
        assert_eq!(mode, UplinkMode::KeyedGet);
    }
}
