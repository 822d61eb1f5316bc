//! Test utilities and shared fixtures for the dino-pageviews workspace.
//!
//! Enabled with the `testing` feature so that every crate's unit and
//! integration tests build records, series and files the same way.

use crate::{Access, Agent, ArticleSeries, Granularity, PageviewMap, PageviewRecord};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Builders for records and series shaped like endpoint output.
pub mod record_fixtures {
    use super::*;

    /// A monthly `user` record for `article`.
    pub fn monthly_record(article: &str, access: Access, timestamp: &str, views: u64) -> PageviewRecord {
        PageviewRecord {
            project: "en.wikipedia".to_string(),
            article: article.replace(' ', "_"),
            granularity: Granularity::Monthly,
            timestamp: timestamp.to_string(),
            access,
            agent: Agent::User,
            views,
        }
    }

    /// `YYYYMM0100` for the month `offset` months after `year`/`month`.
    pub fn month_timestamp(year: i32, month: u32, offset: usize) -> String {
        let zero_based = (month - 1) as usize + offset;
        let year = year + (zero_based / 12) as i32;
        let month = zero_based % 12 + 1;
        format!("{year:04}{month:02}0100")
    }

    /// Consecutive monthly records starting at `year`/`month`, one per entry of `views`.
    pub fn monthly_series(
        article: &str,
        access: Access,
        year: i32,
        month: u32,
        views: &[u64],
    ) -> ArticleSeries {
        views
            .iter()
            .enumerate()
            .map(|(i, &v)| monthly_record(article, access, &month_timestamp(year, month, i), v))
            .collect()
    }

    /// Mapping with one desktop series per `(article, views)` pair, starting July 2015.
    pub fn desktop_map(entries: &[(&str, &[u64])]) -> PageviewMap {
        entries
            .iter()
            .map(|(article, views)| {
                (
                    (*article).to_string(),
                    monthly_series(article, Access::Desktop, 2015, 7, views),
                )
            })
            .collect()
    }

    /// Endpoint response body carrying `series` as its items.
    pub fn items_body(series: &[PageviewRecord]) -> String {
        serde_json::json!({ "items": series }).to_string()
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// A minimal valid configuration file.
    pub fn minimal_config_toml() -> &'static str {
        r#"
[api]
user_agent = "dino-pageviews tests <tests@example.org>"

[request]
start = "2015070100"
end = "2016010100"
"#
    }
}
