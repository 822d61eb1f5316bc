//! Loading saved mappings and reshaping them for plotting.

use crate::types::{LineStyle, TimeSeries};
use chrono::NaiveDate;
use dino_common::{mean, month_label, parse_month_label, PageviewMap, PageviewRecord, PageviewsError, Result};
use std::path::Path;
use tracing::info;

/// One article's counts and month labels as parallel sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleViews {
    /// Article title as stored in the mapping.
    pub article: String,
    /// View count per bucket.
    pub views: Vec<u64>,
    /// `YYYYMMDD` label per bucket.
    pub months: Vec<String>,
}

impl ArticleViews {
    /// Reshape one stored series.
    pub fn from_series(article: impl Into<String>, series: &[PageviewRecord]) -> Self {
        Self {
            article: article.into(),
            views: series.iter().map(|r| r.views).collect(),
            months: series.iter().map(|r| month_label(&r.timestamp).to_string()).collect(),
        }
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Arithmetic mean of the counts.
    pub fn mean(&self) -> Option<f64> {
        mean(&self.views)
    }

    /// Largest count and its month; the earliest month wins ties.
    pub fn peak(&self) -> Option<(u64, &str)> {
        let mut best: Option<(u64, &str)> = None;
        for (&views, month) in self.views.iter().zip(&self.months) {
            if best.map_or(true, |(b, _)| views > b) {
                best = Some((views, month.as_str()));
            }
        }
        best
    }

    /// Calendar dates of the month labels.
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        self.months.iter().map(|m| parse_month_label(m)).collect()
    }

    /// Chart line for this article.
    pub fn to_time_series(&self, label: impl Into<String>, line_style: LineStyle) -> Result<TimeSeries> {
        #[allow(clippy::cast_precision_loss)]
        let points = self
            .dates()?
            .into_iter()
            .zip(self.views.iter().map(|&v| v as f64))
            .collect();
        Ok(TimeSeries::new(label, points, line_style))
    }
}

/// Reshape every article of a mapping, keeping file order.
pub fn reshape(map: &PageviewMap) -> Vec<ArticleViews> {
    map.iter()
        .map(|(article, series)| ArticleViews::from_series(article, series))
        .collect()
}

/// Read a mapping written by the fetcher.
pub fn load_mapping(path: &Path) -> Result<PageviewMap> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        PageviewsError::with_source(format!("Cannot read {}", path.display()), e)
    })?;
    let map: PageviewMap = serde_json::from_str(&text)?;
    info!(path = %path.display(), articles = map.len(), "Loaded pageview mapping");
    Ok(map)
}

/// Desktop and mobile views the charts are drawn from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewsDataset {
    /// Desktop articles in file order.
    pub desktop: Vec<ArticleViews>,
    /// Mobile articles in file order.
    pub mobile: Vec<ArticleViews>,
}

impl ViewsDataset {
    /// Build from already loaded mappings.
    pub fn from_maps(desktop: &PageviewMap, mobile: &PageviewMap) -> Self {
        Self {
            desktop: reshape(desktop),
            mobile: reshape(mobile),
        }
    }

    /// Load the desktop and mobile mapping files.
    pub fn load(desktop_path: &Path, mobile_path: &Path) -> Result<Self> {
        let desktop = load_mapping(desktop_path)?;
        let mobile = load_mapping(mobile_path)?;
        Ok(Self::from_maps(&desktop, &mobile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dino_common::test_utils::record_fixtures::{desktop_map, monthly_series};
    use dino_common::Access;

    #[test]
    fn test_reshape_keeps_order_and_strips_hour() {
        let map = desktop_map(&[("Zuniceratops", &[1, 2]), ("Abelisaurus", &[3])]);
        let views = reshape(&map);

        assert_eq!(views[0].article, "Zuniceratops");
        assert_eq!(views[0].views, vec![1, 2]);
        assert_eq!(views[0].months, vec!["20150701", "20150801"]);
        assert_eq!(views[1].article, "Abelisaurus");
    }

    #[test]
    fn test_peak_prefers_first_occurrence() {
        let series = monthly_series("A", Access::Desktop, 2015, 7, &[5, 9, 9, 1]);
        let views = ArticleViews::from_series("A", &series);
        assert_eq!(views.peak(), Some((9, "20150801")));
    }

    #[test]
    fn test_empty_article() {
        let views = ArticleViews::from_series("A", &[]);
        assert!(views.is_empty());
        assert_eq!(views.mean(), None);
        assert_eq!(views.peak(), None);
    }

    #[test]
    fn test_time_series_dates() {
        let series = monthly_series("A", Access::Desktop, 2015, 12, &[10, 20]);
        let line = ArticleViews::from_series("A", &series)
            .to_time_series("D: A", LineStyle::Solid)
            .unwrap();

        assert_eq!(line.label, "D: A");
        assert_eq!(line.points[1].0, NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
        assert_eq!(line.points[1].1, 20.0);
    }

    #[test]
    fn test_bad_month_label_is_an_error() {
        let views = ArticleViews {
            article: "A".to_string(),
            views: vec![1],
            months: vec!["2015x701".to_string()],
        };
        assert!(views.dates().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_mapping(Path::new("/definitely/not/here.json")).is_err());
    }
}
