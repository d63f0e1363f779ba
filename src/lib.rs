//! hsts-preload library
//!
//! Determines whether a domain qualifies for inclusion in, or removal from,
//! the HSTS preload list:
//! - Strict-Transport-Security header parsing and requirement checks
//! - HTTP to HTTPS redirect chain analysis
//! - TLS certificate chain and cipher suite inspection
//! - Concurrent per-domain checks and a bounded batch worker pool
//!
//! Findings are accumulated as [`Issues`]: errors block eligibility,
//! warnings do not.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hsts_preload::hsts::check_header_string;
//!
//! let issues = check_header_string("max-age=31536000; includeSubDomains; preload");
//! assert!(issues.is_empty());
//! ```

pub mod batch;
pub mod checks;
pub mod cli;
pub mod config;
pub mod hsts;
pub mod models;
pub mod output;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use hsts::HstsHeader;
pub use models::{Issue, Issues};
pub use runner::PreloadChecker;
pub use utils::{Result, ToolkitError};
