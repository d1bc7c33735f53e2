//! Receiver Drain-Decode-Forward Loop

use crate::config::ReceiverConfig;
use crate::display::DisplaySink;
use link_protocol::{decode, DecodeError, Reading};
use radio_link::{Radio, RadioError, ReceiveStateMachine, ReceivedPacket};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{info, warn};
use uplink::UplinkForwarder;

/// Receive-path failures; both trigger the backoff cadence
#[derive(Debug, Error)]
pub enum ReceiveError {
    /// The radio failed while draining
    #[error(transparent)]
    Radio(#[from] RadioError),

    /// The frame payload did not decode
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// One drained frame that decoded cleanly
#[derive(Debug, Clone)]
pub struct DecodedPacket {
    /// The decoded reading
    pub reading: Reading,
    /// Link quality of the carrying frame
    pub rssi_dbm: i16,
    /// Signal-to-noise ratio of the carrying frame
    pub snr_db: f32,
}

/// The receiver's main loop: drain, decode, display, forward
pub struct ReceiverNode<R, F, D>
where
    R: Radio,
    F: UplinkForwarder,
    D: DisplaySink,
{
    config: ReceiverConfig,
    machine: ReceiveStateMachine<R>,
    forwarder: F,
    display: D,
}

impl<R, F, D> ReceiverNode<R, F, D>
where
    R: Radio,
    F: UplinkForwarder,
    D: DisplaySink,
{
    /// Create a receiver node around an initialized radio
    pub fn new(
        config: ReceiverConfig,
        mut radio: R,
        forwarder: F,
        display: D,
    ) -> Result<Self, RadioError> {
        radio.configure(&config.radio)?;
        Ok(Self {
            config,
            machine: ReceiveStateMachine::new(radio),
            forwarder,
            display,
        })
    }

    /// Arm reception
    pub fn arm(&mut self) -> Result<(), RadioError> {
        self.machine.arm()
    }

    /// Drain and decode one pending frame, if any
    ///
    /// Radio and decode failures are logged here; the caller only applies
    /// the backoff cadence.
    pub fn try_receive(&mut self) -> Result<Option<DecodedPacket>, ReceiveError> {
        let packet = match self.machine.try_drain() {
            Ok(Some(packet)) => packet,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = %e, "radio receive failed");
                return Err(e.into());
            }
        };

        self.decode_packet(&packet).map(Some)
    }

    fn decode_packet(&self, packet: &ReceivedPacket) -> Result<DecodedPacket, ReceiveError> {
        let text = packet.payload_text();
        info!(
            payload = %text,
            rssi_dbm = packet.rssi_dbm,
            snr_db = packet.snr_db,
            "packet received"
        );

        match decode(&text) {
            Ok(reading) => Ok(DecodedPacket {
                reading,
                rssi_dbm: packet.rssi_dbm,
                snr_db: packet.snr_db,
            }),
            Err(e) => {
                warn!(error = %e, payload = %text, "malformed packet");
                Err(e.into())
            }
        }
    }

    /// Run the receive loop
    ///
    /// Cadence: `forward_interval_secs` after a successful forward,
    /// `decode_backoff_secs` after a receive or decode failure. A transport
    /// failure on the uplink drops the reading and keeps the loop going.
    pub async fn run(mut self) -> Result<(), RadioError> {
        self.arm()?;
        info!("receiver loop started");

        let poll = Duration::from_millis(self.config.poll_interval_ms);
        let forward_delay = Duration::from_secs(self.config.forward_interval_secs);
        let backoff = Duration::from_secs(self.config.decode_backoff_secs);

        loop {
            match self.try_receive() {
                Ok(None) => {
                    sleep(poll).await;
                }
                Ok(Some(decoded)) => {
                    self.display.show(&decoded.reading);

                    if let Err(e) = self.forwarder.forward(&decoded.reading).await {
                        warn!(error = %e, "uplink failed, reading dropped");
                    }
                    sleep(forward_delay).await;
                }
                Err(_) => {
                    sleep(backoff).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::LogDisplay;
    use link_protocol::encode;
    use radio_link::MockRadio;
    use uplink::UplinkError;

    /// Forwarder that records what it was handed
    #[derive(Default)]
    struct CaptureForwarder {
        sent: std::sync::Mutex<Vec<Reading>>,
    }

    impl UplinkForwarder for CaptureForwarder {
        async fn forward(&self, reading: &Reading) -> Result<(), UplinkError> {
            self.sent.lock().unwrap().push(*reading);
            Ok(())
        }
    }

    fn node_with_peer() -> (
        ReceiverNode<MockRadio, CaptureForwarder, LogDisplay>,
        MockRadio,
    ) {
        let (peer, radio) = MockRadio::pair();
        let node = ReceiverNode::new(
            ReceiverConfig::default(),
            radio,
            CaptureForwarder::default(),
            LogDisplay,
        )
        .unwrap();
        (node, peer)
    }

    #[test]
    fn test_clean_frame_decodes() {
        let (mut node, mut sender) = node_with_peer();
        node.arm().unwrap();

        let reading = Reading::new(23.5, 7.2, 345.1);
        sender.transmit(encode(&reading).as_bytes()).unwrap();

        let decoded = node.try_receive().unwrap().expect("frame pending");
        assert!((decoded.reading.temperature - 23.5).abs() < 0.01);
        assert!((decoded.reading.tds - 345.1).abs() < 0.01);
    }

    #[test]
    fn test_idle_poll_sees_nothing() {
        let (mut node, _sender) = node_with_peer();
        node.arm().unwrap();
        assert!(node.try_receive().unwrap().is_none());
    }

    #[test]
    fn test_malformed_frame_is_an_error_not_zero_fill() {
        let (mut node, mut sender) = node_with_peer();
        node.arm().unwrap();

        sender.transmit(b"12.3").unwrap();
        assert!(node.try_receive().is_err());

        // The loop recovers: the next clean frame decodes
        sender.transmit(b"20.0,7.0,100.0").unwrap();
        assert!(node.try_receive().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_end_to_end_link_roundtrip() {
        use sender_node::{
            AcquisitionLoop, MockPhProbe, MockTdsProbe, MockThermometer, SenderConfig, SenderNode,
        };
        use std::sync::Arc;
        use std::time::Instant;

        let (sender_radio, receiver_radio) = MockRadio::pair();

        // Sender side: warm the buffer through the acquisition loop
        let sender_config = SenderConfig::default();
        let buffer = Arc::new(sample_buffer::SampleBuffer::new(
            sender_config.tds.sample_count,
        ));
        let mut sampler = AcquisitionLoop::new(
            MockTdsProbe::new(),
            Arc::clone(&buffer),
            Duration::from_millis(sender_config.sample_interval_ms),
        );
        let start = Instant::now();
        for i in 0..sender_config.tds.sample_count as u64 {
            assert!(sampler.poll(start + Duration::from_millis(40 * i)));
        }

        let mut sender = SenderNode::new(
            sender_config,
            sender_radio,
            MockThermometer::new(),
            MockPhProbe::new(),
            buffer,
        )
        .unwrap();

        // Receiver side
        let mut node = ReceiverNode::new(
            ReceiverConfig::default(),
            receiver_radio,
            CaptureForwarder::default(),
            LogDisplay,
        )
        .unwrap();
        node.arm().unwrap();

        let sent = sender.report_once();
        let decoded = node.try_receive().unwrap().expect("frame on the air");

        assert!((decoded.reading.temperature - sent.temperature).abs() < 0.01);
        assert!((decoded.reading.ph - sent.ph).abs() < 0.01);
        assert!((decoded.reading.tds - sent.tds).abs() < 0.01);

        node.forwarder.forward(&decoded.reading).await.unwrap();
        assert_eq!(node.forwarder.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_back_to_back_frames_keep_only_the_latest() {
        let (mut node, mut sender) = node_with_peer();
        node.arm().unwrap();

        sender.transmit(b"1.0,2.0,3.0").unwrap();
        sender.transmit(b"4.0,5.0,6.0").unwrap();

        let decoded = node.try_receive().unwrap().expect("frame pending");
        assert_eq!(decoded.reading.temperature, 4.0);

        // The first frame was dropped, not queued
        assert!(node.try_receive().unwrap().is_none());
    }
}
