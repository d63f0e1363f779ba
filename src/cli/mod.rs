//! Command-line interface module
//!
//! This module handles CLI argument parsing using Clap.

pub mod args;

pub use args::{normalize_domain, BatchArgs, Cli, Commands, DomainArgs, HeaderArgs};
