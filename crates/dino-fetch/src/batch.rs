//! Desktop, mobile and cumulative batches over the article list.

use crate::articles::Article;
use crate::combine::{accumulate_views, combine_by_timestamp};
use crate::output::{errors_path_for, write_error_report, write_mapping};
use crate::params::RequestParams;
use crate::source::PageviewSource;
use dino_common::{Access, ArticleSeries, PageviewMap, PageviewsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

const PROGRESS_EVERY: usize = 100;

/// Which output a batch produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchKind {
    /// Desktop views as returned by the endpoint.
    Desktop,
    /// Mobile web plus mobile app.
    Mobile,
    /// Running total of desktop, mobile web and mobile app.
    Cumulative,
}

impl BatchKind {
    /// Every batch, in the order the fetch binary runs them.
    pub const ALL: [Self; 3] = [Self::Desktop, Self::Mobile, Self::Cumulative];

    /// Name used in file names and logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::Cumulative => "cumulative",
        }
    }

    /// Access types requested per article. The first one provides the
    /// metadata of combined records.
    pub const fn requested_access(self) -> &'static [Access] {
        match self {
            Self::Desktop => &[Access::Desktop],
            Self::Mobile => &[Access::MobileWeb, Access::MobileApp],
            Self::Cumulative => &[Access::MobileWeb, Access::MobileApp, Access::Desktop],
        }
    }

    /// Access label carried by the stored records.
    pub const fn output_access(self) -> Access {
        match self {
            Self::Desktop => Access::Desktop,
            Self::Mobile => Access::Mobile,
            Self::Cumulative => Access::AllAccess,
        }
    }

    /// `dino_monthly_<label>_<range>.json`
    pub fn file_name(self, range_label: &str) -> String {
        format!("dino_monthly_{}_{range_label}.json", self.label())
    }
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why an article was left out of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    /// No usable body: transport error, empty body or undecodable body.
    EmptyResponse,
    /// The body decoded but had no `items`.
    MissingItems,
    /// The access-type series could not be lined up by month.
    Misaligned,
}

impl FailureKind {
    /// Classify a per-article failure.
    pub fn from_error(err: &PageviewsError) -> Self {
        match err {
            PageviewsError::MissingItems { .. } => Self::MissingItems,
            PageviewsError::Misaligned { .. } => Self::Misaligned,
            _ => Self::EmptyResponse,
        }
    }
}

/// One failed request or combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Article title as listed.
    pub title: String,
    /// Access type of the failed request; absent for combination failures.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub access: Option<Access>,
    /// Failure category.
    pub reason: FailureKind,
    /// Error message.
    pub message: String,
}

/// Articles a batch could not store, persisted as `<output stem>.errors.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Each failed title once, in list order.
    pub titles: Vec<String>,
    /// Every individual failure.
    pub failures: Vec<FailureRecord>,
}

impl ErrorReport {
    /// Record a failure for `title`.
    pub fn record(&mut self, title: &str, access: Option<Access>, err: &PageviewsError) {
        if self.titles.last().map(String::as_str) != Some(title) {
            self.titles.push(title.to_string());
        }
        self.failures.push(FailureRecord {
            title: title.to_string(),
            access,
            reason: FailureKind::from_error(err),
            message: err.to_string(),
        });
    }

    /// Whether nothing failed.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// What one batch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Batch that ran.
    pub kind: BatchKind,
    /// Articles in the input list.
    pub requested: usize,
    /// Articles stored in the mapping.
    pub stored: usize,
    /// Articles skipped.
    pub failed: usize,
    /// Mapping file written.
    pub output: PathBuf,
    /// Error report written.
    pub errors_output: PathBuf,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} batch: {}/{} articles stored, {} failed -> {}",
            self.kind,
            self.stored,
            self.requested,
            self.failed,
            self.output.display()
        )
    }
}

/// Runs batches against a [`PageviewSource`], one request at a time.
pub struct BatchRunner<S> {
    source: S,
    template: RequestParams,
    output_dir: PathBuf,
}

impl<S: PageviewSource> BatchRunner<S> {
    /// Create a runner writing into `output_dir`.
    pub fn new(source: S, template: RequestParams, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            template,
            output_dir: output_dir.into(),
        }
    }

    /// Directory the batches write to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Mapping file a batch writes.
    pub fn output_path(&self, kind: BatchKind) -> PathBuf {
        self.output_dir
            .join(kind.file_name(&self.template.range_label()))
    }

    /// Run one batch and write its mapping and error report.
    ///
    /// Per-article failures only end up in the report; failing to write
    /// either file is an error.
    #[instrument(skip(self, articles), fields(batch = %kind, articles = articles.len()))]
    pub async fn run(&self, kind: BatchKind, articles: &[Article]) -> Result<BatchSummary> {
        let (map, report) = self.collect(kind, articles).await;

        let output = self.output_path(kind);
        let errors_output = errors_path_for(&output);
        write_mapping(&map, &output)?;
        write_error_report(&report, &errors_output)?;

        let summary = BatchSummary {
            kind,
            requested: articles.len(),
            stored: map.len(),
            failed: report.titles.len(),
            output,
            errors_output,
        };
        info!("{}", summary);
        Ok(summary)
    }

    /// Fetch every article for `kind` without writing anything.
    pub async fn collect(&self, kind: BatchKind, articles: &[Article]) -> (PageviewMap, ErrorReport) {
        info!(batch = %kind, articles = articles.len(), "Starting batch");

        let mut map = PageviewMap::new();
        let mut report = ErrorReport::default();

        for (done, article) in articles.iter().enumerate() {
            if let Some(series) = self.fetch_article(kind, &article.name, &mut report).await {
                map.insert(article.name.clone(), series);
            }
            if (done + 1) % PROGRESS_EVERY == 0 {
                info!(done = done + 1, total = articles.len(), stored = map.len(), "Progress");
            }
        }

        (map, report)
    }

    async fn fetch_article(
        &self,
        kind: BatchKind,
        title: &str,
        report: &mut ErrorReport,
    ) -> Option<ArticleSeries> {
        let article_params = self.template.with_article(title);
        let accesses = kind.requested_access();

        // Every sub-request is made before any outcome is inspected.
        let mut responses = Vec::with_capacity(accesses.len());
        for &access in accesses {
            let params = article_params.with_access(access);
            responses.push((access, self.source.fetch(&params).await));
        }

        let mut transport_failed = false;
        for (access, response) in &responses {
            if let Err(err) = response {
                warn!(article = title, %access, error = %err, "Empty response, skipping article");
                report.record(title, Some(*access), err);
                transport_failed = true;
            }
        }
        if transport_failed {
            return None;
        }

        let mut series = Vec::with_capacity(responses.len());
        let mut shape_failed = false;
        for (access, response) in responses {
            let Ok(response) = response else { continue };
            match response.into_items(title) {
                Ok(items) => series.push(items),
                Err(err) => {
                    error!(article = title, %access, error = %err, "Response has no items");
                    report.record(title, Some(access), &err);
                    shape_failed = true;
                }
            }
        }
        if shape_failed {
            return None;
        }

        let combined = match kind {
            BatchKind::Desktop => Ok(series.into_iter().next().unwrap_or_default()),
            BatchKind::Mobile | BatchKind::Cumulative => {
                let sources: Vec<&[_]> = series.iter().map(Vec::as_slice).collect();
                combine_by_timestamp(&sources, kind.output_access())
            }
        };

        match combined {
            Ok(mut combined) => {
                if kind == BatchKind::Cumulative {
                    accumulate_views(&mut combined);
                }
                debug!(article = title, buckets = combined.len(), "Stored");
                Some(combined)
            }
            Err(err) => {
                error!(article = title, error = %err, "Cannot combine access types");
                report.record(title, None, &err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PageviewResponse;
    use async_trait::async_trait;
    use dino_common::test_utils::record_fixtures::monthly_series;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeSource {
        responses: HashMap<(String, Access), Vec<u64>>,
        problems: Vec<(String, Access)>,
        calls: Mutex<Vec<(String, Access)>>,
    }

    impl FakeSource {
        fn with_series(mut self, title: &str, access: Access, views: &[u64]) -> Self {
            self.responses.insert((title.to_string(), access), views.to_vec());
            self
        }

        fn with_problem(mut self, title: &str, access: Access) -> Self {
            self.problems.push((title.to_string(), access));
            self
        }
    }

    #[async_trait]
    impl PageviewSource for FakeSource {
        async fn fetch(&self, params: &RequestParams) -> Result<PageviewResponse> {
            let key = (params.article.clone(), params.access);
            self.calls.lock().unwrap().push(key.clone());

            if self.problems.contains(&key) {
                return Ok(PageviewResponse {
                    title: Some("Not found.".to_string()),
                    ..PageviewResponse::default()
                });
            }
            match self.responses.get(&key) {
                Some(views) => Ok(PageviewResponse::with_items(monthly_series(
                    &params.article,
                    params.access,
                    2015,
                    7,
                    views,
                ))),
                None => Err(PageviewsError::empty_response("no body")),
            }
        }
    }

    fn articles(names: &[&str]) -> Vec<Article> {
        names
            .iter()
            .map(|n| Article {
                name: (*n).to_string(),
                url: None,
            })
            .collect()
    }

    fn runner(source: FakeSource) -> BatchRunner<FakeSource> {
        BatchRunner::new(source, RequestParams::default(), "unused")
    }

    fn views(map: &PageviewMap, title: &str) -> Vec<u64> {
        map.get(title).unwrap().iter().map(|r| r.views).collect()
    }

    #[tokio::test]
    async fn test_desktop_batch_stores_items_as_returned() {
        let source = FakeSource::default()
            .with_series("Tyrannosaurus", Access::Desktop, &[100, 200])
            .with_series("Velociraptor", Access::Desktop, &[5]);
        let runner = runner(source);

        let (map, report) = runner
            .collect(BatchKind::Desktop, &articles(&["Tyrannosaurus", "Velociraptor"]))
            .await;

        assert!(report.is_empty());
        assert_eq!(map.articles().collect::<Vec<_>>(), vec!["Tyrannosaurus", "Velociraptor"]);
        assert_eq!(views(&map, "Tyrannosaurus"), vec![100, 200]);
        assert_eq!(map.get("Velociraptor").unwrap()[0].access, Access::Desktop);
    }

    #[tokio::test]
    async fn test_transport_failure_skips_article() {
        let source = FakeSource::default().with_series("Velociraptor", Access::Desktop, &[5]);
        let runner = runner(source);

        let (map, report) = runner
            .collect(BatchKind::Desktop, &articles(&["Nothosaurus", "Velociraptor"]))
            .await;

        assert!(!map.contains("Nothosaurus"));
        assert!(map.contains("Velociraptor"));
        assert_eq!(report.titles, vec!["Nothosaurus"]);
        assert_eq!(report.failures[0].reason, FailureKind::EmptyResponse);
        assert_eq!(report.failures[0].access, Some(Access::Desktop));
    }

    #[tokio::test]
    async fn test_missing_items_recorded() {
        let source = FakeSource::default().with_problem("Nothosaurus", Access::Desktop);
        let (map, report) = runner(source)
            .collect(BatchKind::Desktop, &articles(&["Nothosaurus"]))
            .await;

        assert!(map.is_empty());
        assert_eq!(report.failures[0].reason, FailureKind::MissingItems);
    }

    #[tokio::test]
    async fn test_mobile_batch_sums_web_and_app() {
        let source = FakeSource::default()
            .with_series("Stegosaurus", Access::MobileWeb, &[10, 20, 30])
            .with_series("Stegosaurus", Access::MobileApp, &[1, 2, 3]);
        let runner = runner(source);

        let (map, _) = runner.collect(BatchKind::Mobile, &articles(&["Stegosaurus"])).await;

        assert_eq!(views(&map, "Stegosaurus"), vec![11, 22, 33]);
        assert!(map
            .get("Stegosaurus")
            .unwrap()
            .iter()
            .all(|r| r.access == Access::Mobile));

        let calls = runner.source.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                ("Stegosaurus".to_string(), Access::MobileWeb),
                ("Stegosaurus".to_string(), Access::MobileApp),
            ]
        );
    }

    #[tokio::test]
    async fn test_mobile_batch_skips_when_one_side_is_empty() {
        let source = FakeSource::default().with_series("Stegosaurus", Access::MobileWeb, &[10]);
        let runner = runner(source);

        let (map, report) = runner.collect(BatchKind::Mobile, &articles(&["Stegosaurus"])).await;

        assert!(map.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].access, Some(Access::MobileApp));
        // Both requests were still made.
        assert_eq!(runner.source.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_cumulative_batch_is_running_total() {
        let source = FakeSource::default()
            .with_series("Allosaurus", Access::MobileWeb, &[1, 2, 3])
            .with_series("Allosaurus", Access::MobileApp, &[10, 20, 30])
            .with_series("Allosaurus", Access::Desktop, &[100, 200, 300]);

        let (map, report) = runner(source)
            .collect(BatchKind::Cumulative, &articles(&["Allosaurus"]))
            .await;

        assert!(report.is_empty());
        assert_eq!(views(&map, "Allosaurus"), vec![111, 333, 666]);
        assert_eq!(map.get("Allosaurus").unwrap()[0].access, Access::AllAccess);
    }

    #[tokio::test]
    async fn test_cumulative_batch_skips_on_any_failure() {
        let source = FakeSource::default()
            .with_series("Allosaurus", Access::MobileWeb, &[1])
            .with_series("Allosaurus", Access::MobileApp, &[10])
            .with_problem("Allosaurus", Access::Desktop);

        let (map, report) = runner(source)
            .collect(BatchKind::Cumulative, &articles(&["Allosaurus"]))
            .await;

        assert!(!map.contains("Allosaurus"));
        assert_eq!(report.titles, vec!["Allosaurus"]);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            BatchKind::Mobile.file_name("201501-202210"),
            "dino_monthly_mobile_201501-202210.json"
        );
        let runner = runner(FakeSource::default());
        assert_eq!(
            runner.output_path(BatchKind::Cumulative),
            Path::new("unused").join("dino_monthly_cumulative_201501-202210.json")
        );
    }

    #[test]
    fn test_error_report_lists_title_once() {
        let mut report = ErrorReport::default();
        let err = PageviewsError::empty_response("no body");
        report.record("A", Some(Access::MobileWeb), &err);
        report.record("A", Some(Access::MobileApp), &err);
        report.record("B", None, &PageviewsError::misaligned("repeat"));

        assert_eq!(report.titles, vec!["A", "B"]);
        assert_eq!(report.failures.len(), 3);
        assert_eq!(report.failures[2].reason, FailureKind::Misaligned);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["failures"][2]["reason"], "misaligned");
        assert!(json["failures"][2].get("access").is_none());
    }
}
