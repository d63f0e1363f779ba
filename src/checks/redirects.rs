//! Redirect chain analysis
//!
//! The transport never follows redirects on its own. Each hop is fetched
//! explicitly so the chain can be recorded and capped.

use super::transport::{Transport, Verification};
use crate::hsts::check_preloadable_response;
use crate::models::Issues;
use tracing::debug;
use url::Url;

/// Issues from the HTTP-origin redirect check
///
/// `first_redirect_hsts` is kept apart so callers can drop it when the main
/// response already failed for the same reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpRedirectIssues {
    pub general: Issues,
    pub first_redirect_hsts: Issues,
}

/// Follow redirects from `initial`, recording every target
///
/// At most `max_redirects` hops are recorded; one more is an error and the
/// chain is returned as recorded so far.
pub async fn follow_redirects(
    transport: &dyn Transport,
    initial: &Url,
    max_redirects: usize,
) -> (Vec<Url>, Issues) {
    let issues = Issues::new();
    let mut chain: Vec<Url> = Vec::new();
    let mut current = initial.clone();

    loop {
        let response = match transport.get(&current, Verification::Verified).await {
            Ok(response) => response,
            Err(e) => return (chain, follow_error(issues, &e.to_string())),
        };

        let Some(location) = response.redirect_location() else {
            return (chain, issues);
        };

        let next = match current.join(location) {
            Ok(next) => next,
            Err(e) => {
                let message = format!("invalid redirect location `{}` from `{}`: {}", location, current, e);
                return (chain, follow_error(issues, &message));
            }
        };

        if chain.len() >= max_redirects {
            debug!("{} exceeded {} redirects at {}", initial, max_redirects, next);
            return (
                chain,
                issues.add_error(
                    "redirects.too_many",
                    "Too many redirects",
                    format!(
                        "There are more than {} redirects starting from `{}`.",
                        max_redirects, initial
                    ),
                ),
            );
        }

        debug!("{} -> {}", current, next);
        chain.push(next.clone());
        current = next;
    }
}

fn follow_error(issues: Issues, message: &str) -> Issues {
    issues.add_error(
        "redirects.follow_error",
        "Error following redirects",
        format!("Redirect error: {}", message),
    )
}

/// Report the first hop of `chain` that is not HTTPS
///
/// Scanning stops at the first insecure hop.
pub fn check_insecure_hops(initial: &Url, chain: &[Url]) -> Issues {
    let issues = Issues::new();

    let Some((index, hop)) = chain.iter().enumerate().find(|(_, u)| u.scheme() != "https") else {
        return issues;
    };

    if index == 0 {
        issues.add_error(
            "redirects.insecure.initial",
            "Insecure redirect",
            format!("`{}` redirects to an insecure page: `{}`", initial, hop),
        )
    } else {
        issues.add_error(
            "redirects.insecure.subsequent",
            "Insecure redirect",
            format!(
                "`{}` redirects to an insecure page on redirect #{}: `{}`",
                initial,
                index + 1,
                hop
            ),
        )
    }
}

/// Classify how `http://domain` upgrades to HTTPS
pub async fn check_http_redirects(
    transport: &dyn Transport,
    domain: &str,
    max_redirects: usize,
) -> HttpRedirectIssues {
    let mut result = HttpRedirectIssues::default();

    let http_url = match Url::parse(&format!("http://{}", domain)) {
        Ok(url) => url,
        Err(e) => {
            result.general = internal_url_error(domain, &e.to_string());
            return result;
        }
    };

    match transport.get(&http_url, Verification::Verified).await {
        Err(e) => {
            debug!("{} is not reachable over HTTP: {}", http_url, e);
            result.general = result.general.add_warning(
                "redirects.http.does_not_exist",
                "Unavailable over HTTP",
                format!(
                    "The site appears to be unavailable over plain HTTP (`{}`). This can prevent \
                     people from visiting your site without typing `https://`. ({})",
                    http_url, e
                ),
            );
            return result;
        }
        Ok(response) if !response.hsts_headers.is_empty() => {
            result.general = result.general.add_warning(
                "redirects.http.useless_header",
                "Unnecessary HSTS header over HTTP",
                format!(
                    "The HTTP page at `{}` sends an HSTS header. This has no effect over HTTP, \
                     and should be removed.",
                    http_url
                ),
            );
        }
        Ok(_) => {}
    }

    let (chain, follow_issues) = follow_redirects(transport, &http_url, max_redirects).await;
    result.general = result.general.combine(follow_issues);
    if result.general.has_errors() {
        return result;
    }

    let Some(first) = chain.first() else {
        result.general = result.general.add_error(
            "redirects.http.no_redirect",
            "No redirect from HTTP",
            format!("`{}` does not redirect to `https://{}`.", http_url, domain),
        );
        return result;
    };

    let first_host = first.host_str().unwrap_or_default();
    let www_host = format!("www.{}", domain);

    if first.scheme() == "https" && first_host.eq_ignore_ascii_case(domain) {
        match transport.get(first, Verification::Verified).await {
            Err(e) => {
                result.general = result.general.add_error(
                    "redirects.http.first_redirect.invalid",
                    "Invalid redirect",
                    format!(
                        "`{}` redirects to `{}`, which we could not fetch: {}",
                        http_url, first, e
                    ),
                );
                return result;
            }
            Ok(response) => {
                let (_, header_issues) = check_preloadable_response(&response);
                if let Some(first_error) = header_issues.errors.first() {
                    result.first_redirect_hsts = result.first_redirect_hsts.add_error(
                        "redirects.http.first_redirect.no_hsts",
                        "HTTP redirects to a page without HSTS",
                        format!(
                            "`{}` redirects to `{}`, which does not serve a HSTS header that \
                             satisfies preload conditions. First error: {}",
                            http_url, first, first_error.summary
                        ),
                    );
                }
            }
        }
        result.general = result
            .general
            .combine(check_insecure_hops(&http_url, &chain));
    } else if first_host.eq_ignore_ascii_case(&www_host) {
        result.general = result.general.add_error(
            "redirects.http.www_first",
            "HTTP redirects to www first",
            format!(
                "`{}` (HTTP) should immediately redirect to `https://{}` (HTTPS) before adding \
                 the www subdomain. Right now, the first redirect is to `{}`. The extra redirect \
                 is required to ensure that any browser which supports HSTS will record the HSTS \
                 entry for the top level domain, not just the subdomain.",
                http_url, domain, first
            ),
        );
    } else {
        result.general = result.general.add_error(
            "redirects.http.first_redirect.insecure",
            "HTTP does not redirect to HTTPS",
            format!(
                "`{}` (HTTP) redirects to `{}`. The first redirect from `{}` should be to a \
                 secure page on the same host (`https://{}`).",
                http_url, first, http_url, domain
            ),
        );
    }

    result
}

/// Check that following redirects from `https://domain` never leaves HTTPS
pub async fn check_https_redirects(
    transport: &dyn Transport,
    domain: &str,
    max_redirects: usize,
) -> Issues {
    let https_url = match Url::parse(&format!("https://{}", domain)) {
        Ok(url) => url,
        Err(e) => return internal_url_error(domain, &e.to_string()),
    };

    let (chain, issues) = follow_redirects(transport, &https_url, max_redirects).await;
    if issues.has_errors() {
        return issues;
    }
    issues.combine(check_insecure_hops(&https_url, &chain))
}

fn internal_url_error(domain: &str, message: &str) -> Issues {
    Issues::new().add_error(
        "internal.redirects.invalid_url",
        "Internal Error",
        format!("Could not build a URL for `{}`: {}", domain, message),
    )
}
