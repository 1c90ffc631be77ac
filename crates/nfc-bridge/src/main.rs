//! Process entrypoint for the NFC bridge.

use anyhow::Result;
use nfc_bridge::{BridgeConfig, BridgeService};
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        // Bind failures and bad configuration land here; everything
        // scan-related is reported over HTTP and never reaches main.
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = BridgeConfig::from_env()?;
    let reader = nfc_reader::detect();
    let service = BridgeService::new(config, reader)?;
    service.run().await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
