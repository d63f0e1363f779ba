//! Network transport used by the checks
//!
//! The checks talk to the network only through the [`Transport`] trait. The
//! production implementation, [`HttpTransport`], uses reqwest for HTTP and
//! tokio-rustls with the Mozilla root store for TLS connection state.

use crate::config::NetworkSettings;
use crate::models::{CertificateView, HttpResponse, SignatureAlgorithm, TlsConnectionState};
use crate::utils::TransportError;
use async_trait::async_trait;
use reqwest::header::{LOCATION, STRICT_TRANSPORT_SECURITY};
use rustls::pki_types::ServerName;
use rustls::ClientConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use url::Url;
use x509_parser::prelude::*;

/// Certificate verification mode for an HTTP request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// Verify the chain against the trusted roots
    Verified,
    /// Accept any certificate. Only used to tell an invalid chain apart
    /// from an unreachable host.
    Insecure,
}

/// Network operations the checks depend on
///
/// Every operation is bounded by the implementation's timeout. Nothing is
/// retried at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a single GET request without following redirects
    async fn get(&self, url: &Url, verification: Verification)
        -> Result<HttpResponse, TransportError>;

    /// Complete a verified TLS handshake and report the connection state
    async fn tls_connect(&self, host: &str, port: u16)
        -> Result<TlsConnectionState, TransportError>;

    /// Open and immediately drop a TCP connection
    async fn tcp_connect(&self, host: &str, port: u16) -> Result<(), TransportError>;
}

/// reqwest + tokio-rustls transport
pub struct HttpTransport {
    verified: reqwest::Client,
    insecure: reqwest::Client,
    tls: TlsConnector,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport from the network settings
    pub fn new(settings: &NetworkSettings) -> Result<Self, TransportError> {
        // Needed when more than one rustls crypto provider is compiled in
        let _ = rustls::crypto::ring::default_provider().install_default();

        let timeout = settings.timeout();
        let verified = build_client(settings, false)?;
        let insecure = build_client(settings, true)?;

        let root_store =
            rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let config = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Ok(Self {
            verified,
            insecure,
            tls: TlsConnector::from(Arc::new(config)),
            timeout,
        })
    }

    async fn connect_tcp(&self, host: &str, port: u16) -> Result<TcpStream, TransportError> {
        tokio::time::timeout(self.timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| TransportError::Timeout {
                host: host.to_string(),
                port,
            })?
            .map_err(|e| TransportError::Connection {
                host: host.to_string(),
                port,
                message: e.to_string(),
            })
    }
}

fn build_client(
    settings: &NetworkSettings,
    accept_invalid_certs: bool,
) -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        .timeout(settings.timeout())
        .user_agent(settings.user_agent.clone())
        .redirect(reqwest::redirect::Policy::none())
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()
        .map_err(TransportError::from)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &Url,
        verification: Verification,
    ) -> Result<HttpResponse, TransportError> {
        let client = match verification {
            Verification::Verified => &self.verified,
            Verification::Insecure => &self.insecure,
        };

        tracing::debug!("GET {} ({:?})", url, verification);
        let response = client.get(url.clone()).send().await?;
        let headers = response.headers();

        let location = headers
            .get(LOCATION)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
        let hsts_headers = headers
            .get_all(STRICT_TRANSPORT_SECURITY)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();

        Ok(HttpResponse {
            url: url.clone(),
            status: response.status().as_u16(),
            location,
            hsts_headers,
        })
    }

    async fn tls_connect(
        &self,
        host: &str,
        port: u16,
    ) -> Result<TlsConnectionState, TransportError> {
        let server_name =
            ServerName::try_from(host.to_string()).map_err(|_| TransportError::Configuration {
                message: format!("Invalid server name: {}", host),
            })?;

        let stream = self.connect_tcp(host, port).await?;
        let tls_stream = tokio::time::timeout(self.timeout, self.tls.connect(server_name, stream))
            .await
            .map_err(|_| TransportError::Timeout {
                host: host.to_string(),
                port,
            })?
            .map_err(|e| TransportError::Handshake {
                host: host.to_string(),
                message: e.to_string(),
            })?;

        let (_, connection) = tls_stream.get_ref();

        let cipher_suite = connection
            .negotiated_cipher_suite()
            .map(|cs| format!("{:?}", cs.suite()))
            .unwrap_or_else(|| "Unknown".to_string());

        let peer_certificates = connection.peer_certificates().unwrap_or_default();
        let mut parsed = Vec::with_capacity(peer_certificates.len());
        for der in peer_certificates {
            parsed.push(certificate_view(der.as_ref())?);
        }

        Ok(TlsConnectionState {
            cipher_suite,
            certificate_chain: without_root(parsed),
        })
    }

    async fn tcp_connect(&self, host: &str, port: u16) -> Result<(), TransportError> {
        self.connect_tcp(host, port).await.map(|_| ())
    }
}

/// Summarize one DER certificate, noting whether it is self-signed
fn certificate_view(der: &[u8]) -> Result<(CertificateView, bool), TransportError> {
    let (_, cert) = X509Certificate::from_der(der).map_err(|e| TransportError::Certificate {
        message: format!("{:?}", e),
    })?;

    let common_name = cert
        .subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .unwrap_or_default()
        .to_string();
    let signature_algorithm =
        SignatureAlgorithm::from_oid(&cert.signature_algorithm.algorithm.to_id_string());
    let self_signed = cert.subject() == cert.issuer();

    Ok((
        CertificateView::new(common_name, signature_algorithm),
        self_signed,
    ))
}

/// Drop a trailing self-signed root; a lone self-signed leaf is kept
fn without_root(mut chain: Vec<(CertificateView, bool)>) -> Vec<CertificateView> {
    if chain.len() > 1 && chain.last().map(|(_, root)| *root).unwrap_or(false) {
        chain.pop();
    }
    chain.into_iter().map(|(view, _)| view).collect()
}
