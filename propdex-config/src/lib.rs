//! Configuration for propdex.
//!
//! One [`IndexConfig`] carries the dataset root plus the scanner, parser and
//! clustering knobs of `propdex-core`. It is read from a TOML or JSON file,
//! inline JSON in the environment, or defaults, and a few fields can be
//! overridden by individual environment variables.
#![allow(missing_docs)]

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::ConfigLoader;
pub use models::{ConfigSource, IndexConfig};
pub use validation::validate;
