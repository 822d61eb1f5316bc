//! Default values for every configuration section.

use crate::schema::*;
use dino_common::{Agent, Granularity, LoggingConfig};
use std::path::PathBuf;

/// Base URL of the Wikimedia REST pageviews metrics.
pub const DEFAULT_ENDPOINT: &str = "https://wikimedia.org/api/rest_v1/metrics/pageviews/";

/// Identifies this tool to Wikimedia operators.
pub const DEFAULT_USER_AGENT: &str =
    "dino-pageviews/0.1 (https://github.com/dino-pageviews/dino-pageviews)";

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            request: RequestConfig::default(),
            throttle: ThrottleConfig::default(),
            paths: PathsConfig::default(),
            plots: PlotsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            project: "en.wikipedia.org".to_string(),
            agent: Agent::User,
            granularity: Granularity::Monthly,
            start: "2015010100".to_string(),
            end: "2022100100".to_string(),
        }
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 100,
            assumed_latency_ms: 2,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            articles_csv: PathBuf::from("data/data_raw/dinosaur_genera.cleaned.SEPT.2022.csv"),
            data_dir: PathBuf::from("data/data_clean"),
            image_dir: PathBuf::from("img"),
        }
    }
}

impl Default for PlotsConfig {
    fn default() -> Self {
        Self {
            width: 1670,
            height: 827,
            top_k: 10,
        }
    }
}
