//! # Dino Common
//!
//! Record types, the ordered result mapping, the shared error type and
//! logging setup used by every crate in the dino-pageviews workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod mapping;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{PageviewsError, Result};
pub use logging::{init_default_logging, init_logging, LogFormat, LoggingConfig};
pub use mapping::PageviewMap;
pub use types::*;
pub use utils::*;
