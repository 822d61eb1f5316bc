//! # Dino Pageviews
//!
//! Wikipedia pageview series for the dinosaur genera articles.
//!
//! Two binaries share this crate: `dino-fetch` queries the per-article
//! endpoint and writes the desktop, mobile and cumulative mappings, and
//! `dino-visualize` turns the desktop and mobile mappings into charts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;

pub use app::*;
pub use error::*;
