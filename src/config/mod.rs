//! Configuration module for hsts-preload
//!
//! Handles loading settings from TOML files.

pub mod settings;

pub use settings::{BatchSettings, NetworkSettings, PublicSuffixSettings, Settings};

use crate::utils::ConfigError;
use std::path::Path;

/// Load settings from an explicit file, or from the default location
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => Settings::load_from_file(path),
        None => Settings::load_default(),
    }
}
