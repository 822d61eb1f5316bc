//! Fetch the desktop, mobile and cumulative pageview mappings.

use anyhow::Context;
use dino_common::init_logging;
use dino_config::ConfigLoader;
use dino_pageviews::run_fetch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    info!("Starting dino-fetch");

    match run_fetch(&config).await {
        Ok(summaries) => {
            for summary in summaries {
                info!("{}", summary);
            }
            Ok(())
        }
        Err(e) => {
            error!("Fetch failed: {}", e);
            Err(e.into())
        }
    }
}
