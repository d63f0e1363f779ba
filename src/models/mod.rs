//! Data models shared by the checks
//!
//! This module contains the issue ledger and the transport-facing response
//! types.

pub mod issue;
pub mod response;

pub use issue::{Issue, Issues};
pub use response::{CertificateView, HttpResponse, SignatureAlgorithm, TlsConnectionState};
