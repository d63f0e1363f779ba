//! Utility modules for hsts-preload
//!
//! This module contains error types and progress indicators.

pub mod error;
pub mod progress;

pub use error::{ConfigError, Result, ToolkitError, TransportError};
