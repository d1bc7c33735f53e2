//! Radio Driver Abstraction
//!
//! The nodes talk to the modem through the `Radio` trait. `MockRadio` pairs
//! two ends over an in-memory channel so both firmware images (and the
//! tests) run without hardware attached.

use crate::error::RadioError;
use crate::flag::PacketFlag;
use chrono::{DateTime, Utc};
use link_protocol::RadioParams;
use std::borrow::Cow;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// A drained radio frame with its link quality
#[derive(Debug, Clone)]
pub struct ReceivedPacket {
    /// Raw frame payload
    pub payload: Vec<u8>,
    /// Received signal strength (dBm)
    pub rssi_dbm: i16,
    /// Signal-to-noise ratio (dB)
    pub snr_db: f32,
    /// When the frame was drained
    pub received_at: DateTime<Utc>,
}

impl ReceivedPacket {
    /// Payload as text (lossy; the wire is ASCII)
    pub fn payload_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

/// Radio driver seam between the nodes and the modem
pub trait Radio {
    /// Apply modulation parameters (spreading factor, coding rate, power)
    fn configure(&mut self, params: &RadioParams) -> Result<(), RadioError>;

    /// Transmit one frame, blocking until the radio accepts it.
    /// Fire-and-forget: there is no acknowledgment path.
    fn transmit(&mut self, payload: &[u8]) -> Result<(), RadioError>;

    /// Arm continuous reception
    fn start_receive(&mut self) -> Result<(), RadioError>;

    /// Drain the last received frame
    fn read_packet(&mut self) -> Result<ReceivedPacket, RadioError>;

    /// The interrupt flag this radio raises when a frame lands
    fn packet_flag(&self) -> Arc<PacketFlag>;
}

/// In-memory radio pair for tests and mock mode
///
/// Each end has a single-slot receive buffer. A frame arriving before the
/// previous one is drained overwrites the slot, and the boolean flag
/// coalesces, preserving the link's single-packet drop behavior.
pub struct MockRadio {
    inbox: Arc<Mutex<Option<Vec<u8>>>>,
    flag: Arc<PacketFlag>,
    peer_inbox: Arc<Mutex<Option<Vec<u8>>>>,
    peer_flag: Arc<PacketFlag>,
    params: RadioParams,
    armed: bool,
}

impl MockRadio {
    /// Create two connected mock radios
    pub fn pair() -> (MockRadio, MockRadio) {
        let inbox_a = Arc::new(Mutex::new(None));
        let inbox_b = Arc::new(Mutex::new(None));
        let flag_a = Arc::new(PacketFlag::new());
        let flag_b = Arc::new(PacketFlag::new());

        let a = MockRadio {
            inbox: Arc::clone(&inbox_a),
            flag: Arc::clone(&flag_a),
            peer_inbox: Arc::clone(&inbox_b),
            peer_flag: Arc::clone(&flag_b),
            params: RadioParams::default(),
            armed: false,
        };
        let b = MockRadio {
            inbox: inbox_b,
            flag: flag_b,
            peer_inbox: inbox_a,
            peer_flag: flag_a,
            params: RadioParams::default(),
            armed: false,
        };
        (a, b)
    }

    /// Current modulation parameters
    pub fn params(&self) -> RadioParams {
        self.params
    }
}

impl Radio for MockRadio {
    fn configure(&mut self, params: &RadioParams) -> Result<(), RadioError> {
        params
            .validate()
            .map_err(|e| RadioError::Init(e.to_string()))?;
        debug!(
            sf = params.spreading_factor,
            cr = params.coding_rate,
            freq_mhz = params.frequency_mhz,
            power_dbm = params.tx_power_dbm,
            "mock radio configured"
        );
        self.params = *params;
        Ok(())
    }

    fn transmit(&mut self, payload: &[u8]) -> Result<(), RadioError> {
        let mut slot = self
            .peer_inbox
            .lock()
            .map_err(|_| RadioError::Transmit("peer buffer poisoned".into()))?;
        if slot.replace(payload.to_vec()).is_some() {
            debug!("peer held an undrained frame, overwritten");
        }
        drop(slot);

        // The delivery edge is the peer's receive interrupt
        self.peer_flag.raise();
        Ok(())
    }

    fn start_receive(&mut self) -> Result<(), RadioError> {
        self.armed = true;
        Ok(())
    }

    fn read_packet(&mut self) -> Result<ReceivedPacket, RadioError> {
        if !self.armed {
            return Err(RadioError::NotArmed);
        }

        let payload = self
            .inbox
            .lock()
            .map_err(|_| RadioError::Receive("receive buffer poisoned".into()))?
            .take()
            .ok_or(RadioError::Empty)?;

        let (rssi_dbm, snr_db) = link_quality(&payload);
        Ok(ReceivedPacket {
            payload,
            rssi_dbm,
            snr_db,
            received_at: Utc::now(),
        })
    }

    fn packet_flag(&self) -> Arc<PacketFlag> {
        Arc::clone(&self.flag)
    }
}

/// Deterministic pseudo link quality derived from the payload
fn link_quality(payload: &[u8]) -> (i16, f32) {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    payload.hash(&mut hasher);
    let hash = hasher.finish();

    let rssi_dbm = -40 - (hash % 80) as i16;
    let snr_db = 12.0 - ((hash >> 8) % 170) as f32 / 10.0;
    (rssi_dbm, snr_db)
}

/// Initialize a radio with a retry/backoff policy
///
/// Replaces the halt-forever-on-init-failure behavior: each failed attempt
/// is logged and retried after `backoff`, and the last error surfaces once
/// the attempts are exhausted.
pub async fn init_with_retry<R, F>(
    mut init: F,
    attempts: u32,
    backoff: Duration,
) -> Result<R, RadioError>
where
    F: FnMut() -> Result<R, RadioError>,
{
    let mut last_error = None;
    for attempt in 1..=attempts {
        match init() {
            Ok(radio) => {
                if attempt > 1 {
                    info!(attempt, "radio initialized after retry");
                }
                return Ok(radio);
            }
            Err(e) => {
                warn!(attempt, error = %e, "radio init failed");
                last_error = Some(e);
                if attempt < attempts {
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
    Err(last_error.unwrap_or_else(|| RadioError::Init("no init attempts made".into())))
}
