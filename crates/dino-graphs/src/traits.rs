//! Graph trait definitions for the chart types.

use crate::dataset::ViewsDataset;
use crate::types::{GraphConfig, TimeSeries};
use dino_common::Result;
use dino_config::PlotsConfig;

/// A chart built from the desktop and mobile views.
pub trait Graph: Send + Sync {
    /// Gets the name of this graph type.
    fn name(&self) -> &'static str;

    /// Gets the description of this graph type.
    fn description(&self) -> &'static str;

    /// File name the chart is saved under.
    fn file_name(&self) -> &'static str;

    /// Select the articles and build the lines to draw.
    fn build(&self, data: &ViewsDataset, plots: &PlotsConfig) -> Result<(GraphConfig, Vec<TimeSeries>)>;
}

/// Chart configuration shared by every graph: canvas size from `plots`,
/// `Date`/`Views` axis labels.
pub fn base_config(title: impl Into<String>, plots: &PlotsConfig) -> GraphConfig {
    GraphConfig {
        title: title.into(),
        width: plots.width,
        height: plots.height,
        ..GraphConfig::default()
    }
}
