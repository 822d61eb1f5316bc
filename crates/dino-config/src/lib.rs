//! # Dino Config
//!
//! Type-safe configuration for the dino-pageviews binaries.
//!
//! This crate provides the configuration schema, its defaults, validation
//! and loading from TOML with environment variable overrides.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
