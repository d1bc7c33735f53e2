//! Water-Quality Sender Node - Main Entry Point

use anyhow::Context;
use radio_link::{init_with_retry, MockRadio};
use sample_buffer::SampleBuffer;
use sender_node::{
    init_logging, AcquisitionLoop, MockPhProbe, MockTdsProbe, MockThermometer, SenderConfig,
    SenderNode,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== AquaLink sender v{} ===", env!("CARGO_PKG_VERSION"));

    let config = SenderConfig::load_or_default("sender.toml");
    info!(
        sf = config.radio.spreading_factor,
        freq_mhz = config.radio.frequency_mhz,
        "radio parameters loaded"
    );

    // Mock radio: transmissions go on the air with no peer attached,
    // matching the link's fire-and-forget contract
    let (radio, _peer) = init_with_retry(
        || Ok(MockRadio::pair()),
        config.init_attempts,
        Duration::from_millis(config.init_backoff_ms),
    )
    .await
    .context("Radio did not come up")?;

    let buffer = Arc::new(SampleBuffer::new(config.tds.sample_count));

    let sampler = AcquisitionLoop::new(
        MockTdsProbe::new(),
        Arc::clone(&buffer),
        Duration::from_millis(config.sample_interval_ms),
    );
    tokio::spawn(sampler.run());

    let node = SenderNode::new(
        config,
        radio,
        MockThermometer::new(),
        MockPhProbe::new(),
        buffer,
    )
    .context("Radio configuration failed")?;

    node.run().await;
    Ok(())
}
