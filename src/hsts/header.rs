//! Parsed HSTS header value

use serde::Serialize;
use std::fmt;

/// Semantic content of one `Strict-Transport-Security` header value
///
/// Only the parser builds populated values; `Default` is the header with
/// nothing present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HstsHeader {
    pub(crate) max_age: Option<u64>,
    pub(crate) include_sub_domains: bool,
    pub(crate) preload: bool,
}

impl HstsHeader {
    /// `max-age` in seconds, `None` when absent or unusable
    pub fn max_age(&self) -> Option<u64> {
        self.max_age
    }

    pub fn include_sub_domains(&self) -> bool {
        self.include_sub_domains
    }

    pub fn preload(&self) -> bool {
        self.preload
    }
}

/// Canonical form: `max-age=N; includeSubDomains; preload`
impl fmt::Display for HstsHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(seconds) = self.max_age {
            parts.push(format!("max-age={}", seconds));
        }
        if self.include_sub_domains {
            parts.push("includeSubDomains".to_string());
        }
        if self.preload {
            parts.push("preload".to_string());
        }
        write!(f, "{}", parts.join("; "))
    }
}
