//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use hsts_preload::checks::{RegistrableDomain, Transport, Verification};
use hsts_preload::models::{CertificateView, HttpResponse, SignatureAlgorithm, TlsConnectionState};
use hsts_preload::utils::TransportError;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use url::Url;

pub const GOOD_HEADER: &str = "max-age=31536000; includeSubDomains; preload";
pub const MODERN_SUITE: &str = "TLS13_AES_128_GCM_SHA256";
pub const SHA256_RSA: &str = "1.2.840.113549.1.1.11";
pub const SHA1_RSA: &str = "1.2.840.113549.1.1.5";

#[derive(Clone)]
enum Scripted {
    Respond(HttpResponse),
    /// Fails verification but answers when verification is off
    BadChain(HttpResponse),
}

/// In-memory transport answering from a fixed script
///
/// Unscripted URLs and hosts behave like closed ports.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: HashMap<String, Scripted>,
    tls: HashMap<String, Result<TlsConnectionState, String>>,
    open_hosts: HashSet<String>,
    verified_gets: Mutex<HashMap<String, usize>>,
}

fn key(url: &str) -> String {
    Url::parse(url).unwrap().to_string()
}

fn refused(host: &str, port: u16) -> TransportError {
    TransportError::Connection {
        host: host.to_string(),
        port,
        message: "connection refused".to_string(),
    }
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with a plain status and optional HSTS header
    pub fn page(self, url: &str, hsts: Option<&str>) -> Self {
        let mut response = HttpResponse::new(Url::parse(url).unwrap(), 200);
        if let Some(value) = hsts {
            response = response.with_hsts_header(value);
        }
        self.respond(url, response)
    }

    pub fn redirect(self, from: &str, to: &str) -> Self {
        let response = HttpResponse::new(Url::parse(from).unwrap(), 301).with_location(to);
        self.respond(from, response)
    }

    pub fn respond(mut self, url: &str, response: HttpResponse) -> Self {
        self.responses.insert(key(url), Scripted::Respond(response));
        self
    }

    pub fn bad_chain(mut self, url: &str) -> Self {
        let response = HttpResponse::new(Url::parse(url).unwrap(), 200);
        self.responses.insert(key(url), Scripted::BadChain(response));
        self
    }

    pub fn tls(mut self, host: &str, state: TlsConnectionState) -> Self {
        self.tls.insert(host.to_string(), Ok(state));
        self.open_hosts.insert(host.to_string());
        self
    }

    /// Port 443 accepts TCP but the handshake fails
    pub fn tls_fails(mut self, host: &str) -> Self {
        self.tls
            .insert(host.to_string(), Err("handshake failure".to_string()));
        self.open_hosts.insert(host.to_string());
        self
    }

    /// Number of verified GETs issued for `url`
    pub fn verified_gets(&self, url: &str) -> usize {
        self.verified_gets
            .lock()
            .unwrap()
            .get(&key(url))
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(
        &self,
        url: &Url,
        verification: Verification,
    ) -> Result<HttpResponse, TransportError> {
        let key = url.to_string();
        if verification == Verification::Verified {
            *self
                .verified_gets
                .lock()
                .unwrap()
                .entry(key.clone())
                .or_insert(0) += 1;
        }

        let host = url.host_str().unwrap_or_default();
        match (self.responses.get(&key), verification) {
            (Some(Scripted::Respond(response)), _) => Ok(response.clone()),
            (Some(Scripted::BadChain(response)), Verification::Insecure) => Ok(response.clone()),
            (Some(Scripted::BadChain(_)), Verification::Verified) => {
                Err(TransportError::Handshake {
                    host: host.to_string(),
                    message: "invalid peer certificate: UnknownIssuer".to_string(),
                })
            }
            (None, _) => Err(refused(host, url.port_or_known_default().unwrap_or(0))),
        }
    }

    async fn tls_connect(
        &self,
        host: &str,
        port: u16,
    ) -> Result<TlsConnectionState, TransportError> {
        match self.tls.get(host) {
            Some(Ok(state)) => Ok(state.clone()),
            Some(Err(message)) => Err(TransportError::Handshake {
                host: host.to_string(),
                message: message.clone(),
            }),
            None => Err(refused(host, port)),
        }
    }

    async fn tcp_connect(&self, host: &str, port: u16) -> Result<(), TransportError> {
        if self.open_hosts.contains(host) {
            Ok(())
        } else {
            Err(refused(host, port))
        }
    }
}

/// Treats the last two labels as the registrable domain
pub struct LastTwoLabels;

impl RegistrableDomain for LastTwoLabels {
    fn registrable_domain(&self, domain: &str) -> Option<String> {
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 {
            return None;
        }
        Some(labels[labels.len() - 2..].join("."))
    }
}

pub fn modern_tls(common_name: &str) -> TlsConnectionState {
    TlsConnectionState {
        cipher_suite: MODERN_SUITE.to_string(),
        certificate_chain: vec![
            CertificateView::new(common_name, SignatureAlgorithm::from_oid(SHA256_RSA)),
            CertificateView::new("Test Intermediate", SignatureAlgorithm::from_oid(SHA256_RSA)),
        ],
    }
}

/// A domain that satisfies every preload requirement
pub fn clean_site(domain: &str) -> ScriptedTransport {
    let https = format!("https://{}/", domain);
    ScriptedTransport::new()
        .page(&https, Some(GOOD_HEADER))
        .redirect(&format!("http://{}/", domain), &https)
        .tls(domain, modern_tls(domain))
}
