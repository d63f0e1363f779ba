//! Check modules for hsts-preload
//!
//! Everything that needs the network goes through [`Transport`].

pub mod domain;
pub mod redirects;
pub mod tls;
pub mod transport;

pub use domain::{
    check_domain_format, check_registrable_domain, check_www, load_suffix_list,
    RegistrableDomain,
};
pub use redirects::{
    check_http_redirects, check_https_redirects, check_insecure_hops, follow_redirects,
    HttpRedirectIssues,
};
pub use tls::{check_cipher_suite, check_connection_state, check_sha1, MODERN_CIPHER_SUITES};
pub use transport::{HttpTransport, Transport, Verification};
