//! # autocheck Config
//!
//! TOML configuration for the autocheck CLI: matcher limits, keyword store
//! location and logging.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationIssue, ValidationResult, ValidationWarning};
