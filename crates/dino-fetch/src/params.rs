//! Request template for the per-article pageviews endpoint.

use dino_common::{Access, Agent, Granularity, PageviewsError, Result};
use dino_config::RequestConfig;
use serde::{Deserialize, Serialize};
use url::Url;

/// Parameters of one per-article request.
///
/// Every request gets its own copy; [`RequestParams::with_access`] and
/// [`RequestParams::with_article`] return new values instead of mutating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParams {
    /// Wiki project, e.g. `en.wikipedia.org`.
    pub project: String,
    /// Access type to request.
    pub access: Access,
    /// Agent type to request.
    pub agent: Agent,
    /// Raw article title, encoded only when the URL is rendered.
    pub article: String,
    /// Bucket size.
    pub granularity: Granularity,
    /// First bucket, `YYYYMMDDHH`.
    pub start: String,
    /// Last bucket, `YYYYMMDDHH`.
    pub end: String,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self::from(&RequestConfig::default())
    }
}

impl From<&RequestConfig> for RequestParams {
    fn from(config: &RequestConfig) -> Self {
        Self {
            project: config.project.clone(),
            access: Access::Desktop,
            agent: config.agent,
            article: String::new(),
            granularity: config.granularity,
            start: config.start.clone(),
            end: config.end.clone(),
        }
    }
}

impl RequestParams {
    /// Copy of these parameters for another access type.
    #[must_use]
    pub fn with_access(&self, access: Access) -> Self {
        Self {
            access,
            ..self.clone()
        }
    }

    /// Copy of these parameters for another article.
    #[must_use]
    pub fn with_article(&self, article: impl Into<String>) -> Self {
        Self {
            article: article.into(),
            ..self.clone()
        }
    }

    /// Render the full request URL below `endpoint`.
    ///
    /// `{endpoint}per-article/{project}/{access}/{agent}/{article}/{granularity}/{start}/{end}`
    pub fn request_url(&self, endpoint: &str) -> Result<Url> {
        if self.article.trim().is_empty() {
            return Err(PageviewsError::validation_field(
                "article title must not be empty",
                "article",
            ));
        }
        if !self.access.is_requestable() {
            return Err(PageviewsError::validation_field(
                format!("access type '{}' cannot be requested", self.access),
                "access",
            ));
        }

        let mut url = Url::parse(endpoint.trim_end_matches('/')).map_err(|e| {
            PageviewsError::validation_field(format!("invalid endpoint '{endpoint}': {e}"), "endpoint")
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                PageviewsError::validation_field(
                    format!("endpoint '{endpoint}' cannot take a path"),
                    "endpoint",
                )
            })?
            .pop_if_empty()
            .push("per-article")
            .push(&self.project)
            .push(self.access.as_str())
            .push(self.agent.as_str())
            .push(&normalize_title(&self.article))
            .push(self.granularity.as_str())
            .push(&self.start)
            .push(&self.end);

        Ok(url)
    }

    /// `YYYYMM-YYYYMM` label of the requested range, used in output file names.
    pub fn range_label(&self) -> String {
        format!("{}-{}", month_prefix(&self.start), month_prefix(&self.end))
    }
}

fn month_prefix(timestamp: &str) -> &str {
    timestamp.get(..6).unwrap_or(timestamp)
}

/// Title as the endpoint spells it: spaces become underscores.
pub fn normalize_title(title: &str) -> String {
    title.replace(' ', "_")
}
