//! Render the pageview charts from saved mappings.

use anyhow::Context;
use dino_common::init_logging;
use dino_config::ConfigLoader;
use dino_pageviews::run_visualize;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    info!("Starting dino-visualize");

    let written = run_visualize(&config).map_err(|e| {
        error!("Visualization failed: {}", e);
        e
    })?;
    for path in written {
        info!(path = %path.display(), "Chart written");
    }
    Ok(())
}
