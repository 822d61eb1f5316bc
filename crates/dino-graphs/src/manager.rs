//! Graph manager for generating every chart from one dataset.

use crate::dataset::ViewsDataset;
use crate::fewest_months::FewestMonthsGraph;
use crate::max_min_average::MaxMinAverageGraph;
use crate::renderer::LineChartRenderer;
use crate::top_10_peak::TopPeakGraph;
use crate::traits::Graph;
use dino_common::Result;
use dino_config::PlotsConfig;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Builds and renders every registered graph into one directory.
pub struct GraphManager {
    renderer: LineChartRenderer,
    graphs: Vec<Box<dyn Graph>>,
    image_dir: PathBuf,
    plots: PlotsConfig,
}

impl GraphManager {
    /// Creates a manager with the three standard charts.
    pub fn new(image_dir: impl Into<PathBuf>, plots: PlotsConfig) -> Self {
        Self {
            renderer: LineChartRenderer::new(),
            graphs: vec![
                Box::new(MaxMinAverageGraph),
                Box::new(TopPeakGraph),
                Box::new(FewestMonthsGraph),
            ],
            image_dir: image_dir.into(),
            plots,
        }
    }

    /// Registered graphs, in generation order.
    pub fn graphs(&self) -> impl Iterator<Item = &dyn Graph> {
        self.graphs.iter().map(AsRef::as_ref)
    }

    /// Directory the charts are written to.
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Generates every graph, creating the image directory first.
    ///
    /// Stops at the first graph that fails.
    #[instrument(skip(self, data), fields(image_dir = %self.image_dir.display()))]
    pub fn generate_all(&self, data: &ViewsDataset) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.image_dir)?;

        let mut written = Vec::with_capacity(self.graphs.len());
        for graph in &self.graphs {
            let (config, series) = graph.build(data, &self.plots)?;
            let path = self.image_dir.join(graph.file_name());
            info!(graph = graph.name(), lines = series.len(), "Rendering {}", graph.description());
            self.renderer.render_to_file(&config, &series, &path)?;
            written.push(path);
        }
        Ok(written)
    }
}
