//! Response type and the seam between batches and the HTTP client.

use crate::params::RequestParams;
use async_trait::async_trait;
use dino_common::{ArticleSeries, PageviewRecord, PageviewsError, Result};
use serde::{Deserialize, Serialize};

/// Decoded body of a per-article request.
///
/// Successful answers carry `items`; error answers carry the problem fields
/// instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageviewResponse {
    /// Time series, one record per bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<PageviewRecord>>,
    /// Problem type URI.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<String>,
    /// Short problem summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Problem detail; the endpoint sends a string or a list of strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl PageviewResponse {
    /// Response carrying `items`.
    pub fn with_items(items: Vec<PageviewRecord>) -> Self {
        Self {
            items: Some(items),
            ..Self::default()
        }
    }

    /// Take the series out of the response, failing when `items` is absent.
    pub fn into_items(self, article: &str) -> Result<ArticleSeries> {
        match self.items {
            Some(items) => Ok(items),
            None => {
                let detail = self
                    .detail
                    .as_ref()
                    .map(render_detail)
                    .or(self.title)
                    .or(self.problem_type);
                Err(PageviewsError::missing_items(article, detail))
            }
        }
    }
}

fn render_detail(detail: &serde_json::Value) -> String {
    match detail {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(parts) => parts
            .iter()
            .map(|p| p.as_str().map_or_else(|| p.to_string(), str::to_string))
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

/// Anything that can answer a per-article pageviews request.
#[async_trait]
pub trait PageviewSource: Send + Sync {
    /// Fetch one article for one access type.
    ///
    /// `Err` means no usable body was obtained; a decoded body without
    /// `items` is still `Ok`.
    async fn fetch(&self, params: &RequestParams) -> Result<PageviewResponse>;
}
