//! # cratedig Common Library
//!
//! Shared code for the cratedig crates:
//! - Error type and result alias
//! - Configuration file resolution and loading

pub mod config;
pub mod error;

pub use config::{ConfigResolver, LoggingConfig, TomlConfig};
pub use error::{Error, Result};
