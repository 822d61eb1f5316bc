//! Articles with the sparsest data.

use crate::dataset::ViewsDataset;
use crate::selection::fewest_buckets;
use crate::traits::{base_config, Graph};
use crate::types::{GraphConfig, LineStyle, TimeSeries};
use dino_common::{PageviewsError, Result};
use dino_config::PlotsConfig;

/// Bottom `k` by number of months per access type; desktop solid, mobile dashed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FewestMonthsGraph;

impl Graph for FewestMonthsGraph {
    fn name(&self) -> &'static str {
        "fewest_months"
    }

    fn description(&self) -> &'static str {
        "Articles with the fewest months of data, desktop and mobile"
    }

    fn file_name(&self) -> &'static str {
        "fewest_month.png"
    }

    fn build(&self, data: &ViewsDataset, plots: &PlotsConfig) -> Result<(GraphConfig, Vec<TimeSeries>)> {
        let mut lines = Vec::with_capacity(plots.top_k * 2);
        for article in fewest_buckets(&data.desktop, plots.top_k) {
            lines.push(article.to_time_series(format!("Desktop: {}", article.article), LineStyle::Solid)?);
        }
        for article in fewest_buckets(&data.mobile, plots.top_k) {
            lines.push(article.to_time_series(format!("Mobile: {}", article.article), LineStyle::Dashed)?);
        }

        if lines.is_empty() {
            return Err(PageviewsError::graph("No articles to rank by months of data"));
        }

        let config = base_config("Fewest month of data for desktop and mobile", plots);
        Ok((config, lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dino_common::test_utils::record_fixtures::desktop_map;

    #[test]
    fn test_fewest_lines() {
        let twelve = [1u64; 12];
        let desktop = desktop_map(&[("A", &twelve), ("B", &[1, 2, 3]), ("C", &[1; 7])]);
        let mobile = desktop_map(&[("B", &[4]), ("C", &[5, 6])]);
        let data = ViewsDataset::from_maps(&desktop, &mobile);
        let plots = PlotsConfig {
            top_k: 2,
            ..PlotsConfig::default()
        };

        let (_, lines) = FewestMonthsGraph.build(&data, &plots).unwrap();

        let labels: Vec<_> = lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Desktop: B", "Desktop: C", "Mobile: B", "Mobile: C"]);
        assert_eq!(lines[3].line_style, LineStyle::Dashed);
        assert_eq!(lines[0].points.len(), 3);
    }
}
