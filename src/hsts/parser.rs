//! HSTS header directive parser
//!
//! Parsing never fails. Syntax problems are reported through the returned
//! [`Issues`] and the header keeps whatever could be understood.

use super::header::HstsHeader;
use crate::models::Issues;

const CANONICAL_INCLUDE_SUB_DOMAINS: &str = "includeSubDomains";

/// One `;`-separated directive, classified once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive<'a> {
    Preload,
    PreloadWithExtra,
    IncludeSubDomains { spelling: &'a str },
    IncludeSubDomainsWithExtra,
    MaxAge { value: &'a str },
    MaxAgeWithoutValue,
    Empty,
    Unknown(&'a str),
}

impl<'a> Directive<'a> {
    fn classify(token: &'a str) -> Self {
        let lower = token.to_ascii_lowercase();

        if lower == "preload" {
            Directive::Preload
        } else if lower.starts_with("preload") {
            Directive::PreloadWithExtra
        } else if lower == "includesubdomains" {
            Directive::IncludeSubDomains { spelling: token }
        } else if lower.starts_with("includesubdomains") {
            Directive::IncludeSubDomainsWithExtra
        } else if lower.starts_with("max-age=") {
            // ASCII lowercasing keeps byte offsets, so index 8 is a boundary
            Directive::MaxAge {
                value: &token["max-age=".len()..],
            }
        } else if lower.starts_with("max-age") {
            Directive::MaxAgeWithoutValue
        } else if token.is_empty() {
            Directive::Empty
        } else {
            Directive::Unknown(token)
        }
    }
}

// Only LWS (space and tab) is stripped, not general Unicode whitespace.
fn trim_lws(segment: &str) -> &str {
    segment.trim_matches(|c| c == ' ' || c == '\t')
}

/// Parse a raw `Strict-Transport-Security` value
pub fn parse_header_string(raw: &str) -> (HstsHeader, Issues) {
    let mut header = HstsHeader::default();
    let mut issues = Issues::new();

    let directives: Vec<&str> = raw.split(';').map(trim_lws).collect();

    if directives.len() == 1 && directives[0].is_empty() {
        return (
            header,
            issues.add_warning(
                "header.parse.empty",
                "Empty Header",
                "The HSTS header is empty.",
            ),
        );
    }

    for directive in directives {
        match Directive::classify(directive) {
            Directive::Preload => {
                if header.preload {
                    issues = issues.add_unique_warning(
                        "header.parse.repeated.preload",
                        "Repeated preload directive",
                        "Header contains a repeated directive: `preload`",
                    );
                } else {
                    header.preload = true;
                }
            }
            Directive::PreloadWithExtra => {
                issues = issues.add_unique_warning(
                    "header.parse.invalid.preload",
                    "Invalid preload directive",
                    "Header contains a `preload` directive with extra parts.",
                );
            }
            Directive::IncludeSubDomains { spelling } => {
                if header.include_sub_domains {
                    issues = issues.add_unique_warning(
                        "header.parse.repeated.include_sub_domains",
                        "Repeated includeSubDomains directive",
                        "Header contains a repeated directive: `includeSubDomains`",
                    );
                } else {
                    header.include_sub_domains = true;
                    if spelling != CANONICAL_INCLUDE_SUB_DOMAINS {
                        issues = issues.add_unique_warning(
                            "header.parse.spelling.include_sub_domains",
                            "Non-standard capitalization of includeSubDomains",
                            format!(
                                "Header contains the token `{}`. The recommended capitalization is `{}`.",
                                spelling, CANONICAL_INCLUDE_SUB_DOMAINS
                            ),
                        );
                    }
                }
            }
            Directive::IncludeSubDomainsWithExtra => {
                issues = issues.add_unique_warning(
                    "header.parse.invalid.include_sub_domains",
                    "Invalid includeSubDomains directive",
                    "The header contains an `includeSubDomains` directive with extra parts.",
                );
            }
            Directive::MaxAge { value } => {
                let (max_age, max_age_issues) = parse_max_age(directive, value);
                issues = issues.combine(max_age_issues);

                let Some(seconds) = max_age else {
                    continue;
                };

                if header.max_age.is_none() {
                    header.max_age = Some(seconds);
                } else {
                    issues = issues.add_unique_warning(
                        "header.parse.repeated.max_age",
                        "Repeated max-age directive",
                        "The header contains a repeated directive: `max-age`",
                    );
                }
            }
            Directive::MaxAgeWithoutValue => {
                issues = issues.add_unique_error(
                    "header.parse.invalid.max_age.no_value",
                    "max-age directive without a value",
                    "The header contains a max-age directive name without an associated value. \
                     Please specify the max-age in seconds.",
                );
            }
            Directive::Empty => {
                issues = issues.add_unique_warning(
                    "header.parse.empty_directive",
                    "Empty directive or extra semicolon",
                    "The header includes an empty directive or extra semicolon.",
                );
            }
            Directive::Unknown(token) => {
                issues = issues.add_warning(
                    "header.parse.unknown_directive",
                    "Unknown directive",
                    format!("The header contains an unknown directive: `{}`", token),
                );
            }
        }
    }

    (header, issues)
}

/// Parse the text after `max-age=`
///
/// Every character must be an ASCII digit before the value is handed to the
/// integer parser, so signs such as `-101` or `+101` are rejected.
fn parse_max_age(directive: &str, value: &str) -> (Option<u64>, Issues) {
    let mut issues = Issues::new();

    if value.len() > 1 && value.starts_with('0') {
        issues = issues.add_warning(
            "header.parse.max_age.leading_zero",
            "Unexpected max-age syntax",
            format!(
                "The header's max-age value contains a leading 0: `{}`",
                directive
            ),
        );
    }

    if !value.chars().all(|c| c.is_ascii_digit()) {
        return (
            None,
            issues.add_error(
                "header.parse.max_age.non_digit_characters",
                "Invalid max-age syntax",
                format!(
                    "The header's max-age value contains characters that are not digits: `{}`",
                    directive
                ),
            ),
        );
    }

    match value.parse::<u64>() {
        Ok(seconds) => (Some(seconds), issues),
        Err(_) => (
            None,
            issues.add_error(
                "header.parse.max_age.parse_int_error",
                "Invalid max-age syntax",
                format!("We could not parse the header's max-age value `{}`.", value),
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Directive::classify("PRELOAD"), Directive::Preload);
        assert_eq!(Directive::classify("preloaded"), Directive::PreloadWithExtra);
        assert_eq!(
            Directive::classify("includesubdomains"),
            Directive::IncludeSubDomains {
                spelling: "includesubdomains"
            }
        );
        assert_eq!(
            Directive::classify("includeSubDomains=1"),
            Directive::IncludeSubDomainsWithExtra
        );
        assert_eq!(
            Directive::classify("Max-Age=10"),
            Directive::MaxAge { value: "10" }
        );
        assert_eq!(Directive::classify("max-age"), Directive::MaxAgeWithoutValue);
        assert_eq!(Directive::classify(""), Directive::Empty);
        assert_eq!(Directive::classify("report-uri"), Directive::Unknown("report-uri"));
    }

    #[test]
    fn test_trim_lws_only_strips_space_and_tab() {
        assert_eq!(trim_lws(" \tpreload\t "), "preload");
        assert_eq!(trim_lws("\u{a0}preload"), "\u{a0}preload");
        assert_eq!(trim_lws("preload\n"), "preload\n");
    }

    #[test]
    fn test_full_header() {
        let (header, issues) = parse_header_string("max-age=31536000; includeSubDomains; preload");
        assert_eq!(header.max_age(), Some(31536000));
        assert!(header.include_sub_domains());
        assert!(header.preload());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_empty_header_short_circuits() {
        for raw in ["", " ", "\t  "] {
            let (header, issues) = parse_header_string(raw);
            assert_eq!(header, HstsHeader::default());
            assert!(issues.errors.is_empty());
            assert_eq!(issues.warning_codes(), vec!["header.parse.empty"]);
        }
    }

    #[test]
    fn test_non_ascii_whitespace_is_unknown_directive() {
        let (header, issues) = parse_header_string("preload;\u{a0}");
        assert!(header.preload());
        assert_eq!(issues.warning_codes(), vec!["header.parse.unknown_directive"]);
    }

    #[test]
    fn test_leading_zero_is_warning_only() {
        let (header, issues) = parse_header_string("max-age=0123");
        assert_eq!(header.max_age(), Some(123));
        assert!(issues.errors.is_empty());
        assert_eq!(issues.warning_codes(), vec!["header.parse.max_age.leading_zero"]);
    }

    #[test]
    fn test_single_zero_is_not_leading_zero() {
        let (header, issues) = parse_header_string("max-age=0");
        assert_eq!(header.max_age(), Some(0));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_signed_max_age_is_rejected() {
        for raw in ["max-age=-101", "max-age=+101"] {
            let (header, issues) = parse_header_string(raw);
            assert_eq!(header.max_age(), None, "{}", raw);
            assert_eq!(
                issues.error_codes(),
                vec!["header.parse.max_age.non_digit_characters"]
            );
        }
    }

    #[test]
    fn test_max_age_overflow_and_empty_value() {
        let (header, issues) = parse_header_string("max-age=99999999999999999999999");
        assert_eq!(header.max_age(), None);
        assert_eq!(issues.error_codes(), vec!["header.parse.max_age.parse_int_error"]);

        let (header, issues) = parse_header_string("max-age=");
        assert_eq!(header.max_age(), None);
        assert_eq!(issues.error_codes(), vec!["header.parse.max_age.parse_int_error"]);
    }

    #[test]
    fn test_max_age_without_value_is_unique_error() {
        let (header, issues) = parse_header_string("max-age; max-age; preload");
        assert_eq!(header.max_age(), None);
        assert!(header.preload());
        assert_eq!(issues.error_codes(), vec!["header.parse.invalid.max_age.no_value"]);
    }

    #[test]
    fn test_invalid_max_age_does_not_block_later_value() {
        let (header, issues) = parse_header_string("max-age=abc; max-age=100");
        assert_eq!(header.max_age(), Some(100));
        assert_eq!(
            issues.error_codes(),
            vec!["header.parse.max_age.non_digit_characters"]
        );
        assert!(issues.warnings.is_empty());
    }
}
