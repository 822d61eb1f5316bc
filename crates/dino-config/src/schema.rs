//! Configuration schema definitions using serde.

use dino_common::{Agent, Granularity, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pageviews endpoint configuration.
    pub api: ApiConfig,
    /// Request template shared by every batch.
    pub request: RequestConfig,
    /// Pause inserted before each request.
    pub throttle: ThrottleConfig,
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Chart configuration.
    pub plots: PlotsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Pageviews endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every `per-article/...` path is appended to.
    pub endpoint: String,
    /// Sent as `User-Agent`; Wikimedia asks for a way to contact the caller.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Values every request starts from before the article and access type are filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Wiki project, e.g. `en.wikipedia.org`.
    pub project: String,
    /// Agent type.
    pub agent: Agent,
    /// Bucket size.
    pub granularity: Granularity,
    /// First bucket, `YYYYMMDDHH`.
    pub start: String,
    /// Last bucket, `YYYYMMDDHH`.
    pub end: String,
}

/// Fixed throttle derived from a request budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Requests per second the endpoint allows.
    pub requests_per_second: u32,
    /// Expected round trip time, subtracted from the per-request budget.
    pub assumed_latency_ms: u64,
}

impl ThrottleConfig {
    /// Pause before each request: `1 / requests_per_second - assumed_latency`, never negative.
    pub fn interval(&self) -> Duration {
        if self.requests_per_second == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(1.0 / f64::from(self.requests_per_second))
            .saturating_sub(Duration::from_millis(self.assumed_latency_ms))
    }
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// CSV listing the article titles to fetch.
    pub articles_csv: PathBuf,
    /// Directory the fetcher writes and the visualizer reads.
    pub data_dir: PathBuf,
    /// Directory the charts are written to.
    pub image_dir: PathBuf,
}

/// Chart configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotsConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// How many articles the ranked charts keep per access type.
    pub top_k: usize,
}
