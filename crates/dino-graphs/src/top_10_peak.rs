//! Articles with the largest single-month traffic.

use crate::dataset::ViewsDataset;
use crate::selection::top_k_by_peak;
use crate::traits::{base_config, Graph};
use crate::types::{AxisScale, GraphConfig, LegendPlacement, LineStyle, TimeSeries};
use dino_common::{PageviewsError, Result};
use dino_config::PlotsConfig;

/// Top `k` by peak per access type; desktop solid, mobile dashed, log scale.
#[derive(Debug, Default, Clone, Copy)]
pub struct TopPeakGraph;

impl Graph for TopPeakGraph {
    fn name(&self) -> &'static str {
        "top_10_peak"
    }

    fn description(&self) -> &'static str {
        "Articles with the highest monthly peak, desktop and mobile"
    }

    fn file_name(&self) -> &'static str {
        "top10peak.png"
    }

    fn build(&self, data: &ViewsDataset, plots: &PlotsConfig) -> Result<(GraphConfig, Vec<TimeSeries>)> {
        let mut lines = Vec::with_capacity(plots.top_k * 2);
        for article in top_k_by_peak(&data.desktop, plots.top_k) {
            lines.push(article.to_time_series(format!("D: {}", article.article), LineStyle::Solid)?);
        }
        for article in top_k_by_peak(&data.mobile, plots.top_k) {
            lines.push(article.to_time_series(format!("M: {}", article.article), LineStyle::Dashed)?);
        }

        if lines.is_empty() {
            return Err(PageviewsError::graph("No article has a peak to rank"));
        }

        let mut config = base_config(
            format!("Top {} for desktop and mobile", plots.top_k),
            plots,
        );
        config.y_scale = AxisScale::Log;
        config.legend = LegendPlacement::Outside;
        Ok((config, lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dino_common::test_utils::record_fixtures::desktop_map;

    #[test]
    fn test_ranked_lines() {
        let desktop = desktop_map(&[("A", &[50]), ("B", &[200]), ("C", &[10])]);
        let mobile = desktop_map(&[("A", &[5, 6]), ("C", &[70])]);
        let data = ViewsDataset::from_maps(&desktop, &mobile);
        let plots = PlotsConfig {
            top_k: 2,
            ..PlotsConfig::default()
        };

        let (config, lines) = TopPeakGraph.build(&data, &plots).unwrap();

        let labels: Vec<_> = lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["D: B", "D: A", "M: C", "M: A"]);
        assert_eq!(lines[0].line_style, LineStyle::Solid);
        assert_eq!(lines[2].line_style, LineStyle::Dashed);
        assert_eq!(config.y_scale, AxisScale::Log);
        assert_eq!(config.legend, LegendPlacement::Outside);
        assert_eq!(config.title, "Top 2 for desktop and mobile");
    }
}
