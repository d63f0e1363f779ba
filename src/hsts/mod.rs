//! HSTS header parsing and requirement checks
//!
//! This module provides:
//! - Tokenizing a `Strict-Transport-Security` value into an [`HstsHeader`]
//! - Preload-addition and preload-removal policy checks
//! - Single-header checks on a probed response

pub mod header;
pub mod parser;
pub mod requirements;

pub use header::HstsHeader;
pub use parser::parse_header_string;
pub use requirements::{
    check_header_string, check_preload_requirements, check_preloadable_response,
    check_removable_header_string, check_removable_response, check_removal_requirements,
    MAX_AGE_CEILING, MINIMUM_MAX_AGE,
};
