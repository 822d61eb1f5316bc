//! # Dino Graphs
//!
//! Loads the desktop and mobile mappings written by the fetcher, ranks the
//! articles and renders the line charts with plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod dataset;
pub mod manager;
pub mod renderer;
pub mod selection;
pub mod traits;
pub mod types;
pub mod utils;

// Graph implementations
pub mod fewest_months;
pub mod max_min_average;
pub mod top_10_peak;

pub use dataset::*;
pub use fewest_months::FewestMonthsGraph;
pub use manager::*;
pub use max_min_average::MaxMinAverageGraph;
pub use renderer::LineChartRenderer;
pub use selection::*;
pub use top_10_peak::TopPeakGraph;
pub use traits::*;
pub use types::*;
