//! # Dino Fetch
//!
//! Fetches monthly pageview series for a list of Wikipedia articles, combines
//! the access types each batch needs and writes one JSON mapping per batch.
//!
//! Requests go out strictly one at a time with a fixed pause before each; a
//! failed article is skipped and recorded, never fatal to the batch.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod articles;
pub mod batch;
pub mod client;
pub mod combine;
pub mod output;
pub mod params;
pub mod source;

pub use articles::{load_articles, read_articles, Article};
pub use batch::{BatchKind, BatchRunner, BatchSummary, ErrorReport, FailureKind, FailureRecord};
pub use client::{ClientConfig, PageviewsClient};
pub use combine::{accumulate_views, combine_by_timestamp};
pub use output::{errors_path_for, write_error_report, write_mapping};
pub use params::{normalize_title, RequestParams};
pub use source::{PageviewResponse, PageviewSource};
