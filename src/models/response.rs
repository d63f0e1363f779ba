//! HTTP response and TLS connection state as seen by the checks

use serde::Serialize;
use url::Url;

/// The parts of an HTTP response the checks care about
///
/// Redirects are never followed by the transport; a 3xx response is returned
/// as-is with its `Location` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// URL that was requested
    pub url: Url,
    /// HTTP status code
    pub status: u16,
    /// Raw `Location` header, if any
    pub location: Option<String>,
    /// Every `Strict-Transport-Security` header value, in received order
    pub hsts_headers: Vec<String>,
}

impl HttpResponse {
    /// Create a response with no interesting headers
    pub fn new(url: Url, status: u16) -> Self {
        Self {
            url,
            status,
            location: None,
            hsts_headers: Vec::new(),
        }
    }

    /// Set the `Location` header
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Add a `Strict-Transport-Security` header
    pub fn with_hsts_header(mut self, value: impl Into<String>) -> Self {
        self.hsts_headers.push(value.into());
        self
    }

    /// The redirect target, if this response is a redirect that carries one
    pub fn redirect_location(&self) -> Option<&str> {
        match self.status {
            301 | 302 | 303 | 307 | 308 => self.location.as_deref(),
            _ => None,
        }
    }
}

/// Signature algorithm of a certificate, as far as the checks need to know
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SignatureAlgorithm {
    Sha1WithRsa,
    EcdsaWithSha1,
    Other(String),
}

impl SignatureAlgorithm {
    /// Classify a dotted signature algorithm OID
    pub fn from_oid(oid: &str) -> Self {
        match oid {
            "1.2.840.113549.1.1.5" => SignatureAlgorithm::Sha1WithRsa,
            "1.2.840.10045.4.1" => SignatureAlgorithm::EcdsaWithSha1,
            other => SignatureAlgorithm::Other(other.to_string()),
        }
    }

    pub fn is_sha1(&self) -> bool {
        matches!(
            self,
            SignatureAlgorithm::Sha1WithRsa | SignatureAlgorithm::EcdsaWithSha1
        )
    }
}

/// One certificate of a verified chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateView {
    pub common_name: String,
    pub signature_algorithm: SignatureAlgorithm,
}

impl CertificateView {
    pub fn new(common_name: impl Into<String>, signature_algorithm: SignatureAlgorithm) -> Self {
        Self {
            common_name: common_name.into(),
            signature_algorithm,
        }
    }
}

/// Negotiated state of a verified TLS connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TlsConnectionState {
    /// Negotiated cipher suite name, e.g. `TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256`
    pub cipher_suite: String,
    /// Leaf first, ending at the last intermediate (root excluded)
    pub certificate_chain: Vec<CertificateView>,
}
