//! Error types and utilities for the pageview pipeline

use thiserror::Error;

/// Result type alias for pageview operations
pub type Result<T> = std::result::Result<T, PageviewsError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

/// Main error type for pageview operations
#[derive(Error, Debug)]
pub enum PageviewsError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport level failures talking to the pageviews endpoint
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// The endpoint answered, but with nothing usable in the body
    #[error("Empty response: {message}")]
    EmptyResponse { message: String },

    /// The response decoded, but has no `items` array
    #[error("Response for '{article}' has no items{}", detail_suffix(.detail))]
    MissingItems {
        article: String,
        detail: Option<String>,
    },

    /// Series fetched for different access types cannot be lined up by month
    #[error("Misaligned series: {message}")]
    Misaligned { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Article list loading errors
    #[error("Article list error: {message}")]
    ArticleList {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Validation errors for configuration values or input data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl PageviewsError {
    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new empty response error
    pub fn empty_response(msg: impl Into<String>) -> Self {
        Self::EmptyResponse {
            message: msg.into(),
        }
    }

    /// Create a new missing items error
    pub fn missing_items(article: impl Into<String>, detail: Option<String>) -> Self {
        Self::MissingItems {
            article: article.into(),
            detail,
        }
    }

    /// Create a new misalignment error
    pub fn misaligned(msg: impl Into<String>) -> Self {
        Self::Misaligned {
            message: msg.into(),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether the failure happened before any usable body was obtained.
    ///
    /// These are the "no data" outcomes of a single request: the article is
    /// skipped, but the response itself was never inspected.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::EmptyResponse { .. } | Self::Serialization(_)
        )
    }

    /// Whether the body arrived but did not have the expected shape.
    pub fn is_shape_failure(&self) -> bool {
        matches!(self, Self::MissingItems { .. } | Self::Misaligned { .. })
    }
}

// Error conversion implementations for external types

/// Convert from reqwest::Error to PageviewsError
impl From<reqwest::Error> for PageviewsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

/// Convert from toml::de::Error to PageviewsError
impl From<toml::de::Error> for PageviewsError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

/// Convert from toml::ser::Error to PageviewsError
impl From<toml::ser::Error> for PageviewsError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config_with_source("TOML serialization error", err)
    }
}

/// Convert from csv::Error to PageviewsError
impl From<csv::Error> for PageviewsError {
    fn from(err: csv::Error) -> Self {
        let message = match err.position() {
            Some(pos) => format!("Malformed CSV near line {}", pos.line()),
            None => "Failed to read CSV".to_string(),
        };
        Self::ArticleList {
            message,
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to PageviewsError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for PageviewsError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}
