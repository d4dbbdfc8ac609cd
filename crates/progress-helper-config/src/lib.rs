//! # Progress Helper Config
//!
//! Configuration management for Progress Helper: browser endpoint, pacing,
//! page selectors and the state file location.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
