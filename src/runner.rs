//! Domain check orchestration
//!
//! Sequences the pre-checks and the canonical HTTPS probe, fans the
//! remaining checks out concurrently and merges their issues in a fixed
//! order so the report for a domain is deterministic.

use crate::checks::{
    check_connection_state, check_domain_format, check_http_redirects, check_https_redirects,
    check_registrable_domain, check_www, HttpTransport, RegistrableDomain, Transport,
    Verification,
};
use crate::config::Settings;
use crate::hsts::{check_preloadable_response, check_removable_response};
use crate::models::{HttpResponse, Issues};
use crate::utils::Result;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Default cap on redirects followed from one starting URL
pub const DEFAULT_MAX_REDIRECTS: usize = 3;

/// Checks whole domains for preload eligibility
///
/// Cheap to share across tasks behind an `Arc`; it holds no per-domain state.
pub struct PreloadChecker {
    transport: Arc<dyn Transport>,
    suffixes: Arc<dyn RegistrableDomain>,
    max_redirects: usize,
}

impl PreloadChecker {
    pub fn new(transport: Arc<dyn Transport>, suffixes: Arc<dyn RegistrableDomain>) -> Self {
        Self {
            transport,
            suffixes,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Build a checker backed by [`HttpTransport`]
    pub fn from_settings(settings: &Settings, suffixes: Arc<dyn RegistrableDomain>) -> Result<Self> {
        let transport = HttpTransport::new(&settings.network)?;
        Ok(Self::new(Arc::new(transport), suffixes)
            .with_max_redirects(settings.network.max_redirects))
    }

    /// Check whether `domain` satisfies every preload requirement
    ///
    /// Returns the HSTS header value when exactly one was served.
    pub async fn preloadable_domain(&self, domain: &str) -> (Option<String>, Issues) {
        let format_issues = check_domain_format(domain);
        if format_issues.has_errors() {
            return (None, format_issues);
        }

        let domain = domain.to_ascii_lowercase();
        info!("Checking {} for preload eligibility", domain);

        let etld1_issues = check_registrable_domain(self.suffixes.as_ref(), &domain);
        let is_registrable = !etld1_issues.has_errors();
        let issues = format_issues.combine(etld1_issues);

        let response = match self.probe(&domain).await {
            Ok(response) => response,
            Err(probe_issues) => return (None, issues.combine(probe_issues)),
        };

        let transport = self.transport.as_ref();
        let (tls_issues, (header, header_issues), http_issues, https_issues, www_issues) = tokio::join!(
            self.inspect_tls(&domain),
            async { check_preloadable_response(&response) },
            check_http_redirects(transport, &domain, self.max_redirects),
            check_https_redirects(transport, &domain, self.max_redirects),
            async {
                if is_registrable {
                    check_www(transport, &domain).await
                } else {
                    Issues::new()
                }
            },
        );

        let header_ok = !header_issues.has_errors();
        let mut issues = issues
            .combine(tls_issues)
            .combine(header_issues)
            .combine(http_issues.general);
        // Avoid reporting the same missing header twice
        if header_ok {
            issues = issues.combine(http_issues.first_redirect_hsts);
        }
        let issues = issues.combine(https_issues).combine(www_issues);

        debug!(
            "{}: {} errors, {} warnings",
            domain,
            issues.errors.len(),
            issues.warnings.len()
        );
        (header, issues)
    }

    /// Check whether `domain` serves a header that allows removal
    pub async fn removable_domain(&self, domain: &str) -> (Option<String>, Issues) {
        let domain = domain.to_ascii_lowercase();
        info!("Checking {} for preload removal", domain);

        match self.probe(&domain).await {
            Ok(response) => check_removable_response(&response),
            Err(issues) => (None, issues),
        }
    }

    /// GET `https://domain/`, retrying once
    ///
    /// When both verified attempts fail an unverified request decides whether
    /// the chain is invalid or the host is unreachable.
    async fn probe(&self, domain: &str) -> std::result::Result<HttpResponse, Issues> {
        let url = Url::parse(&format!("https://{}/", domain)).map_err(|e| {
            Issues::new().add_error(
                "internal.domain.url",
                "Internal Error",
                format!("Could not build a URL for `{}`: {}", domain, e),
            )
        })?;

        let mut last_error = None;
        for attempt in 1..=2 {
            match self.transport.get(&url, Verification::Verified).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    debug!("Probe {} of {} failed: {}", attempt, url, e);
                    last_error = Some(e);
                }
            }
        }
        let message = last_error.map(|e| e.to_string()).unwrap_or_default();

        let issues = Issues::new();
        let issues = match self.transport.get(&url, Verification::Insecure).await {
            Ok(_) => issues.add_error(
                "domain.tls.invalid_cert_chain",
                "Invalid Certificate Chain",
                format!(
                    "https://{} uses an incomplete or invalid certificate chain. Check out your \
                     site at https://www.ssllabs.com/ssltest/",
                    domain
                ),
            ),
            Err(_) => issues.add_error(
                "domain.tls.cannot_connect",
                "Cannot connect using TLS",
                format!("We cannot connect to https://{} using TLS (\"{}\").", domain, message),
            ),
        };
        Err(issues)
    }

    async fn inspect_tls(&self, domain: &str) -> Issues {
        match self.transport.tls_connect(domain, 443).await {
            Ok(state) => check_connection_state(&state),
            Err(e) => Issues::new().add_error(
                "internal.domain.tls.connection_state",
                "Internal Error",
                format!("Could not inspect the TLS connection to `{}`: {}", domain, e),
            ),
        }
    }
}
