//! Custom error types for hsts-preload
//!
//! These are reserved for the plumbing around the checks: building the
//! transport, loading configuration and the public suffix list. Problems
//! with the domain being checked are reported as issues, never as errors.

use thiserror::Error;

/// Top-level error type
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Public suffix list error: {message}")]
    SuffixList { message: String },

    #[error("Input error: {message}")]
    Input { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Network failures surfaced by a [`Transport`](crate::checks::Transport)
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection to {host}:{port} timed out")]
    Timeout { host: String, port: u16 },

    #[error("Connection to {host}:{port} failed: {message}")]
    Connection {
        host: String,
        port: u16,
        message: String,
    },

    #[error("TLS handshake with {host} failed: {message}")]
    Handshake { host: String, message: String },

    #[error("Failed to parse certificate: {message}")]
    Certificate { message: String },

    #[error("TLS configuration error: {message}")]
    Configuration { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias using ToolkitError
pub type Result<T> = std::result::Result<T, ToolkitError>;
