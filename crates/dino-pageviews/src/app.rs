//! Orchestration of the fetch and visualize runs.

use crate::error::{AppError, AppResult};
use dino_config::Config;
use dino_fetch::{
    load_articles, Article, BatchKind, BatchRunner, BatchSummary, ClientConfig, PageviewSource,
    PageviewsClient, RequestParams,
};
use dino_graphs::{GraphManager, ViewsDataset};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Mapping file `kind` is written to under the configured data directory.
pub fn batch_output_path(config: &Config, kind: BatchKind) -> PathBuf {
    let range = RequestParams::from(&config.request).range_label();
    config.paths.data_dir.join(kind.file_name(&range))
}

/// Fetch every batch with the HTTP client built from `config`.
pub async fn run_fetch(config: &Config) -> AppResult<Vec<BatchSummary>> {
    let articles = load_articles(&config.paths.articles_csv)?;
    let client = PageviewsClient::new(ClientConfig::from(config))?;
    run_batches(config, client, &articles).await
}

/// Run the desktop, mobile and cumulative batches in order against `source`.
///
/// Every batch runs and writes its files even when articles fail; failures
/// only end up in the error reports. Only a write failure stops the run.
#[instrument(skip_all, fields(articles = articles.len()))]
pub async fn run_batches<S: PageviewSource>(
    config: &Config,
    source: S,
    articles: &[Article],
) -> AppResult<Vec<BatchSummary>> {
    let template = RequestParams::from(&config.request);
    let runner = BatchRunner::new(source, template, config.paths.data_dir.clone());

    let mut summaries = Vec::with_capacity(BatchKind::ALL.len());
    for kind in BatchKind::ALL {
        let summary = runner.run(kind, articles).await?;
        if summary.failed > 0 {
            warn!(
                batch = %kind,
                failed = summary.failed,
                report = %summary.errors_output.display(),
                "Some articles were skipped"
            );
        }
        if summary.stored == 0 && !articles.is_empty() {
            warn!(batch = %kind, requested = summary.requested, "Batch stored no article");
        }
        summaries.push(summary);
    }
    Ok(summaries)
}

/// Load the desktop and mobile mappings and render every chart.
#[instrument(skip_all)]
pub fn run_visualize(config: &Config) -> AppResult<Vec<PathBuf>> {
    let desktop = batch_output_path(config, BatchKind::Desktop);
    let mobile = batch_output_path(config, BatchKind::Mobile);
    info!(desktop = %desktop.display(), mobile = %mobile.display(), "Loading views");

    let data = ViewsDataset::load(&desktop, &mobile)?;
    let manager = GraphManager::new(config.paths.image_dir.clone(), config.plots.clone());
    let written = manager.generate_all(&data)?;

    info!(charts = written.len(), "Charts written to {}", manager.image_dir().display());
    Ok(written)
}
