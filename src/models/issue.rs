//! Issue ledger shared by every check
//!
//! Checks never fail on bad input. They return an [`Issues`] value instead,
//! which callers combine in a fixed order so the earliest finding is always
//! reported first.

use serde::Serialize;
use std::fmt;

/// A single finding reported by a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Stable dotted identifier, e.g. `header.preloadable.max_age.too_low`
    pub code: String,
    /// Short human label
    pub summary: String,
    /// Full explanation
    pub message: String,
}

impl Issue {
    /// Create a new issue
    pub fn new(
        code: impl Into<String>,
        summary: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.summary, self.message)
    }
}

/// Ordered errors and warnings accumulated by one or more checks
///
/// Errors block eligibility, warnings never do. Entries are only ever
/// appended; the builder methods consume the ledger and hand it back so each
/// check owns the value it returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Issues {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl Issues {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error
    pub fn add_error(
        mut self,
        code: impl Into<String>,
        summary: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.errors.push(Issue::new(code, summary, message));
        self
    }

    /// Append a warning
    pub fn add_warning(
        mut self,
        code: impl Into<String>,
        summary: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.warnings.push(Issue::new(code, summary, message));
        self
    }

    /// Append an error unless one with the same code is already present
    pub fn add_unique_error(
        mut self,
        code: impl Into<String>,
        summary: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        push_unique(&mut self.errors, Issue::new(code, summary, message));
        self
    }

    /// Append a warning unless one with the same code is already present
    pub fn add_unique_warning(
        mut self,
        code: impl Into<String>,
        summary: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        push_unique(&mut self.warnings, Issue::new(code, summary, message));
        self
    }

    /// Concatenate two ledgers, `self` first
    pub fn combine(mut self, other: Issues) -> Self {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }

    /// Drop every warning, keeping errors untouched
    pub fn without_warnings(self) -> Self {
        Self {
            errors: self.errors,
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Error codes in reporting order
    pub fn error_codes(&self) -> Vec<&str> {
        self.errors.iter().map(|i| i.code.as_str()).collect()
    }

    /// Warning codes in reporting order
    pub fn warning_codes(&self) -> Vec<&str> {
        self.warnings.iter().map(|i| i.code.as_str()).collect()
    }
}

fn push_unique(list: &mut Vec<Issue>, issue: Issue) {
    if !list.iter().any(|existing| existing.code == issue.code) {
        list.push(issue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_call_order() {
        let issues = Issues::new()
            .add_error("b", "B", "second letter")
            .add_error("a", "A", "first letter")
            .add_warning("w", "W", "warning");

        assert_eq!(issues.error_codes(), vec!["b", "a"]);
        assert_eq!(issues.warning_codes(), vec!["w"]);
    }

    #[test]
    fn test_add_allows_duplicate_codes() {
        let issues = Issues::new()
            .add_error("domain.tls.sha1", "SHA-1", "leg one")
            .add_error("domain.tls.sha1", "SHA-1", "leg two");

        assert_eq!(issues.errors.len(), 2);
    }

    #[test]
    fn test_add_unique_keeps_first_occurrence() {
        let issues = Issues::new()
            .add_unique_warning("header.parse.repeated.preload", "Repeated", "first")
            .add_unique_warning("header.parse.repeated.preload", "Repeated", "second")
            .add_unique_error("x", "X", "first")
            .add_unique_error("x", "X", "second");

        assert_eq!(issues.warnings.len(), 1);
        assert_eq!(issues.warnings[0].message, "first");
        assert_eq!(issues.errors.len(), 1);
        assert_eq!(issues.errors[0].message, "first");
    }

    #[test]
    fn test_unique_is_scoped_to_one_list() {
        let issues = Issues::new()
            .add_error("same", "Same", "as error")
            .add_unique_warning("same", "Same", "as warning");

        assert_eq!(issues.errors.len(), 1);
        assert_eq!(issues.warnings.len(), 1);
    }

    #[test]
    fn test_combine_orders_first_ledger_first() {
        let a = Issues::new()
            .add_error("a.error", "A", "a")
            .add_warning("a.warning", "A", "a");
        let b = Issues::new()
            .add_error("b.error.1", "B", "b1")
            .add_error("b.error.2", "B", "b2");

        let combined = a.combine(b);

        assert_eq!(
            combined.error_codes(),
            vec!["a.error", "b.error.1", "b.error.2"]
        );
        assert_eq!(combined.warning_codes(), vec!["a.warning"]);
    }

    #[test]
    fn test_without_warnings() {
        let issues = Issues::new()
            .add_error("e", "E", "e")
            .add_warning("w", "W", "w")
            .without_warnings();

        assert!(issues.has_errors());
        assert!(issues.warnings.is_empty());
    }

    #[test]
    fn test_empty_ledger() {
        let issues = Issues::new();
        assert!(issues.is_empty());
        assert!(!issues.has_errors());
    }
}
