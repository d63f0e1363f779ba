//! TLS chain inspection
//!
//! Flags SHA-1 signed certificates and cipher suites outside the modern
//! AEAD allow-list.

use crate::models::{CertificateView, Issues, TlsConnectionState};

/// Negotiated suites that do not produce `tls.obsolete_cipher_suite`
///
/// rustls reports suites by their `Debug` name, so both that spelling and
/// the IANA name are listed for TLS 1.3.
pub const MODERN_CIPHER_SUITES: &[&str] = &[
    "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256",
    "TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384",
    "TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256",
    "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256",
    "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384",
    "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256",
    "TLS13_AES_128_GCM_SHA256",
    "TLS13_AES_256_GCM_SHA384",
    "TLS13_CHACHA20_POLY1305_SHA256",
    "TLS_AES_128_GCM_SHA256",
    "TLS_AES_256_GCM_SHA384",
    "TLS_CHACHA20_POLY1305_SHA256",
];

/// Report the first SHA-1 signed certificate in the chain
///
/// The chain is leaf first and must not contain the root.
pub fn check_sha1(chain: &[CertificateView]) -> Issues {
    let issues = Issues::new();

    match chain.iter().find(|cert| cert.signature_algorithm.is_sha1()) {
        Some(cert) => issues.add_error(
            "domain.tls.sha1",
            "SHA-1 Certificate",
            format!(
                "One or more of the certificates in your certificate chain is signed using \
                 SHA-1. This needs to be replaced. See \
                 https://security.googleblog.com/2015/12/an-update-on-sha-1-certificates-in.html. \
                 (The first SHA-1 certificate found has a common-name of \"{}\".)",
                cert.common_name
            ),
        ),
        None => issues,
    }
}

pub fn check_cipher_suite(cipher_suite: &str) -> Issues {
    let issues = Issues::new();

    if MODERN_CIPHER_SUITES.contains(&cipher_suite) {
        return issues;
    }

    issues.add_warning(
        "tls.obsolete_cipher_suite",
        "Obsolete Cipher Suite",
        format!(
            "The site is using an obsolete cipher suite ({}). Consider enabling an ECDHE key \
             exchange with AES-GCM or ChaCha20-Poly1305.",
            cipher_suite
        ),
    )
}

/// SHA-1 check followed by the cipher suite check
pub fn check_connection_state(state: &TlsConnectionState) -> Issues {
    check_sha1(&state.certificate_chain).combine(check_cipher_suite(&state.cipher_suite))
}
