//! Preload and removal requirements for a parsed HSTS header

use super::header::HstsHeader;
use super::parser::parse_header_string;
use crate::models::{HttpResponse, Issues};

/// Minimum accepted `max-age`: 18 weeks
pub const MINIMUM_MAX_AGE: u64 = 18 * 7 * 86_400;

/// `max-age` values above this are unusual enough to mention: 10 years
pub const MAX_AGE_CEILING: u64 = 10 * 365 * 86_400;

/// Check a parsed header against the preload-addition requirements
///
/// Every requirement is checked, so a header missing everything reports all
/// three problems at once.
pub fn check_preload_requirements(header: &HstsHeader) -> Issues {
    Issues::new()
        .combine(check_include_sub_domains(header))
        .combine(check_preload_directive(header))
        .combine(check_max_age(header))
}

fn check_include_sub_domains(header: &HstsHeader) -> Issues {
    let issues = Issues::new();
    if header.include_sub_domains() {
        return issues;
    }
    issues.add_error(
        "header.preloadable.include_sub_domains.missing",
        "No includeSubDomains directive",
        "The header must contain the `includeSubDomains` directive.",
    )
}

fn check_preload_directive(header: &HstsHeader) -> Issues {
    let issues = Issues::new();
    if header.preload() {
        return issues;
    }
    issues.add_error(
        "header.preloadable.preload.missing",
        "No preload directive",
        "The header must contain the `preload` directive.",
    )
}

fn check_max_age(header: &HstsHeader) -> Issues {
    let issues = Issues::new();
    match header.max_age() {
        None => issues.add_error(
            "header.preloadable.max_age.missing",
            "No max-age directive",
            "Header requirement error: Header must contain a valid `max-age` directive.",
        ),
        Some(seconds) if seconds < MINIMUM_MAX_AGE => issues.add_error(
            "header.preloadable.max_age.too_low",
            "max-age too low",
            format!(
                "The max-age must be at least {} seconds (== 18 weeks), but the header currently only has max-age={}.",
                MINIMUM_MAX_AGE, seconds
            ),
        ),
        Some(seconds) if seconds > MAX_AGE_CEILING => issues.add_warning(
            "header.preloadable.max_age.over_10_years",
            "max-age over 10 years",
            format!(
                "FYI: The max-age ({} seconds) is longer than 10 years, which is an unusually long value.",
                seconds
            ),
        ),
        Some(_) => issues,
    }
}

/// Check a parsed header against the preload-removal requirements
pub fn check_removal_requirements(header: &HstsHeader) -> Issues {
    let mut issues = Issues::new();
    if header.preload() {
        issues = issues.add_error(
            "header.removable.contains.preload",
            "Contains preload directive",
            "Header requirement error: For preload list removal, the header must not contain the `preload` directive.",
        );
    }
    if header.max_age().is_none() {
        issues = issues.add_error(
            "header.removable.missing.max_age",
            "No max-age directive",
            "Header requirement error: Header must contain a valid `max-age` directive.",
        );
    }
    issues
}

/// Parse a header value and check it against the preload requirements
pub fn check_header_string(raw: &str) -> Issues {
    let (header, issues) = parse_header_string(raw);
    issues.combine(check_preload_requirements(&header))
}

/// Parse a header value and check it against the removal requirements
///
/// Parser warnings are dropped: sites asking for removal often have cosmetic
/// header problems that must not block the request. Parser errors are kept.
pub fn check_removable_header_string(raw: &str) -> Issues {
    let (header, issues) = parse_header_string(raw);
    issues
        .without_warnings()
        .combine(check_removal_requirements(&header))
}

/// Check that a response carries exactly one HSTS header satisfying the
/// preload requirements
///
/// The header value is returned only when exactly one header was present.
pub fn check_preloadable_response(response: &HttpResponse) -> (Option<String>, Issues) {
    check_single_header(response, check_header_string)
}

/// Check that a response carries exactly one HSTS header satisfying the
/// removal requirements
pub fn check_removable_response(response: &HttpResponse) -> (Option<String>, Issues) {
    check_single_header(response, check_removable_header_string)
}

fn check_single_header(
    response: &HttpResponse,
    checker: fn(&str) -> Issues,
) -> (Option<String>, Issues) {
    let issues = Issues::new();
    match response.hsts_headers.as_slice() {
        [] => (
            None,
            issues.add_error(
                "response.no_header",
                "No HSTS header",
                "Response error: No HSTS header is present on the response.",
            ),
        ),
        [value] => (Some(value.clone()), issues.combine(checker(value))),
        values => (
            None,
            issues.add_error(
                "response.multiple_headers",
                "Multiple HSTS headers",
                format!(
                    "Response error: Multiple HSTS headers (number of HSTS headers: {}).",
                    values.len()
                ),
            ),
        ),
    }
}
