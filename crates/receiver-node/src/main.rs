//! Water-Quality Receiver Node - Main Entry Point

use anyhow::Context;
use link_protocol::{encode, Reading};
use radio_link::{init_with_retry, MockRadio, Radio};
use receiver_node::{init_logging, LogDisplay, ReceiverConfig, ReceiverNode};
use std::time::Duration;
use tracing::info;
use uplink::AnyForwarder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== AquaLink receiver v{} ===", env!("CARGO_PKG_VERSION"));

    let config = ReceiverConfig::load_or_default("receiver.toml");
    info!(
        sf = config.radio.spreading_factor,
        freq_mhz = config.radio.frequency_mhz,
        endpoint = %config.uplink.endpoint,
        "receiver configured"
    );

    let (radio, peer) = init_with_retry(
        || Ok(MockRadio::pair()),
        config.init_attempts,
        Duration::from_millis(config.init_backoff_ms),
    )
    .await
    .context("Radio did not come up")?;

    // With no sender hardware on the bench, feed the link a drifting
    // reading so the full drain-decode-forward path runs
    tokio::spawn(mock_sender(peer));

    let forwarder =
        AnyForwarder::from_config(&config.uplink).context("Uplink configuration failed")?;

    let node =
        ReceiverNode::new(config, radio, forwarder, LogDisplay).context("Radio setup failed")?;

    node.run().await.context("Receiver loop failed")?;
    Ok(())
}

/// Mock traffic source standing in for the sender node
async fn mock_sender(mut radio: MockRadio) {
    let mut tick = 0u32;
    loop {
        tokio::time::sleep(Duration::from_secs(30)).await;
        tick += 1;

        let drift = (tick % 10) as f32 / 10.0;
        let reading = Reading::new(24.0 + drift, 6.8 + drift / 5.0, 340.0 + drift * 20.0);
        let _ = radio.transmit(encode(&reading).as_bytes());
    }
}
