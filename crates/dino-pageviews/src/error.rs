//! Application-wide error types using thiserror.

use dino_common::PageviewsError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration, fetch, load or render error.
    #[error(transparent)]
    Pageviews(#[from] PageviewsError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the binaries.
pub type AppResult<T> = Result<T, AppError>;
