//! Domain name checks
//!
//! Format validation, the registrable-domain (eTLD+1) check and the `www`
//! subdomain TLS check.

use super::transport::Transport;
use crate::config::{NetworkSettings, PublicSuffixSettings};
use crate::models::Issues;
use crate::utils::{Result, ToolkitError};
use publicsuffix::{List, Psl};
use tracing::{debug, info};

/// Computes the registrable domain (eTLD+1) of a host name
pub trait RegistrableDomain: Send + Sync {
    /// `None` when the name has no registrable part, e.g. a bare public suffix
    fn registrable_domain(&self, domain: &str) -> Option<String>;
}

impl RegistrableDomain for List {
    fn registrable_domain(&self, domain: &str) -> Option<String> {
        let lower = domain.to_ascii_lowercase();
        self.domain(lower.as_bytes())
            .and_then(|d| std::str::from_utf8(d.as_bytes()).ok().map(str::to_string))
    }
}

/// Load the public suffix list from a local file, or download it
///
/// The download is bounded by the network timeout.
pub async fn load_suffix_list(
    settings: &PublicSuffixSettings,
    network: &NetworkSettings,
) -> Result<List> {
    let text = match &settings.path {
        Some(path) => {
            debug!("Reading public suffix list from {}", path.display());
            tokio::fs::read_to_string(path).await?
        }
        None => {
            info!("Downloading public suffix list from {}", settings.url);
            let client = reqwest::Client::builder()
                .timeout(network.timeout())
                .user_agent(network.user_agent.clone())
                .build()
                .map_err(|e| suffix_error(&settings.url, e))?;
            let response = client
                .get(&settings.url)
                .send()
                .await
                .map_err(|e| suffix_error(&settings.url, e))?
                .error_for_status()
                .map_err(|e| suffix_error(&settings.url, e))?;
            response
                .text()
                .await
                .map_err(|e| suffix_error(&settings.url, e))?
        }
    };

    text.parse::<List>().map_err(|e| ToolkitError::SuffixList {
        message: format!("{:?}", e),
    })
}

fn suffix_error(url: &str, e: reqwest::Error) -> ToolkitError {
    ToolkitError::SuffixList {
        message: format!("failed to download {}: {}", url, e),
    }
}

/// Validate the shape of a domain name
///
/// All applicable problems are reported, not just the first.
pub fn check_domain_format(domain: &str) -> Issues {
    let mut issues = Issues::new();

    if domain.starts_with('.') {
        issues = issues.add_error(
            "domain.format.begins_with_dot",
            "Invalid domain name",
            "Please provide a domain that does not begin with `.`",
        );
    }
    if domain.ends_with('.') {
        issues = issues.add_error(
            "domain.format.ends_with_dot",
            "Invalid domain name",
            "Please provide a domain that does not end with `.`",
        );
    }
    if domain.contains("..") {
        issues = issues.add_error(
            "domain.format.contains_double_dot",
            "Invalid domain name",
            "Please provide a domain that does not contain `..`",
        );
    }
    if domain.split('.').count() < 2 {
        issues = issues.add_error(
            "domain.format.only_one_label",
            "Invalid domain name",
            "Please provide a domain with least two labels (e.g. `example.com` rather than \
             `com` or `example`).",
        );
    }

    let lower = domain.to_ascii_lowercase();
    if let Some(bad) = lower
        .chars()
        .find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '-' | '.'))
    {
        issues = issues.add_error(
            "domain.format.invalid_characters",
            "Invalid domain name",
            format!(
                "Please provide a domain using valid characters (letters, numbers, dashes, \
                 dots). Found `{}`.",
                bad
            ),
        );
    }

    issues
}

/// Require `domain` to be its own registrable domain
pub fn check_registrable_domain(suffixes: &dyn RegistrableDomain, domain: &str) -> Issues {
    let issues = Issues::new();

    match suffixes.registrable_domain(domain) {
        None => issues.add_error(
            "internal.domain.name.cannot_compute_etld1",
            "Internal Error",
            format!("Could not compute eTLD+1 for `{}`.", domain),
        ),
        Some(etld1) if !etld1.eq_ignore_ascii_case(domain) => issues.add_error(
            "domain.is_subdomain",
            "Subdomain",
            format!(
                "`{}` is a subdomain. Please preload `{}` instead. (Due to the size of the \
                 preload list and the behaviour of cookies across subdomains, we only accept \
                 automated preload list submissions of whole registered domains.)",
                domain, etld1
            ),
        ),
        Some(_) => issues,
    }
}

/// If `www.<domain>` accepts TCP on 443 it must also complete a verified
/// TLS handshake. A missing `www` is fine.
pub async fn check_www(transport: &dyn Transport, domain: &str) -> Issues {
    let issues = Issues::new();
    let www = format!("www.{}", domain);

    if let Err(e) = transport.tcp_connect(&www, 443).await {
        debug!("{} is not reachable on 443: {}", www, e);
        return issues;
    }

    match transport.tls_connect(&www, 443).await {
        Ok(_) => issues,
        Err(e) => issues.add_error(
            "domain.www.no_tls",
            "www subdomain does not support HTTPS",
            format!(
                "Domain error: The www subdomain exists, but we couldn't connect to it using \
                 HTTPS (\"{}\"). Since many people type this by habit, HSTS preloading would \
                 likely cause issues for your site.",
                e
            ),
        ),
    }
}
