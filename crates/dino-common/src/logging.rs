//! Structured logging infrastructure

use crate::{PageviewsError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output style of the log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human oriented output
    Pretty,
    /// One line per event
    Compact,
}

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "dino_fetch=trace"); `RUST_LOG` wins when set
    pub level: String,
    /// Line format
    pub format: LogFormat,
    /// Optional file to append log output to instead of stdout
    pub file: Option<String>,
    /// Whether to log span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            PageviewsError::config_with_source(format!("Invalid log level '{}'", config.level), e)
        })?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let file = config
        .file
        .as_ref()
        .map(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
        })
        .transpose()?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match (config.format, file) {
        (LogFormat::Pretty, None) => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init(),
        (LogFormat::Pretty, Some(file)) => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(false)
                    .with_span_events(span_events)
                    .with_target(config.include_targets)
                    .with_writer(Mutex::new(file)),
            )
            .try_init(),
        (LogFormat::Compact, None) => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init(),
        (LogFormat::Compact, Some(file)) => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(false)
                    .with_span_events(span_events)
                    .with_target(config.include_targets)
                    .with_writer(Mutex::new(file)),
            )
            .try_init(),
    };

    installed.map_err(|e| PageviewsError::config_with_source("Failed to install logger", e))
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<()> {
    init_logging(&LoggingConfig::default())
}
