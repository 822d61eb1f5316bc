//! Highest and lowest average traffic, desktop and mobile.

use crate::dataset::{ArticleViews, ViewsDataset};
use crate::selection::max_min_average;
use crate::traits::{base_config, Graph};
use crate::types::{GraphConfig, LineStyle, TimeSeries};
use dino_common::{PageviewsError, Result};
use dino_config::PlotsConfig;
use tracing::debug;

/// Four lines: desktop max, desktop min, mobile max, mobile min.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaxMinAverageGraph;

impl MaxMinAverageGraph {
    fn push_extremes(
        lines: &mut Vec<TimeSeries>,
        prefix: &str,
        articles: &[ArticleViews],
    ) -> Result<()> {
        match max_min_average(articles) {
            Some(extremes) => {
                debug!(
                    max = %extremes.max.article,
                    min = %extremes.min.article,
                    "{} averages", prefix
                );
                lines.push(extremes.max.to_time_series(
                    format!("{prefix} Max - {}", extremes.max.article),
                    LineStyle::Solid,
                )?);
                lines.push(extremes.min.to_time_series(
                    format!("{prefix} Min - {}", extremes.min.article),
                    LineStyle::Solid,
                )?);
            }
            None => debug!("No {} article has data", prefix),
        }
        Ok(())
    }
}

impl Graph for MaxMinAverageGraph {
    fn name(&self) -> &'static str {
        "max_min_average"
    }

    fn description(&self) -> &'static str {
        "Articles with the highest and lowest average monthly views"
    }

    fn file_name(&self) -> &'static str {
        "max_min_avg.png"
    }

    fn build(&self, data: &ViewsDataset, plots: &PlotsConfig) -> Result<(GraphConfig, Vec<TimeSeries>)> {
        let mut lines = Vec::with_capacity(4);
        Self::push_extremes(&mut lines, "Desktop", &data.desktop)?;
        Self::push_extremes(&mut lines, "Mobile", &data.mobile)?;

        if lines.is_empty() {
            return Err(PageviewsError::graph("No article has any views to average"));
        }

        let config = base_config("Max and Min average for desktop and mobile", plots);
        Ok((config, lines))
    }
}
