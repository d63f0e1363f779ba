//! Batch checking over many domains
//!
//! A fixed pool of workers pulls domains from a shared queue and pushes one
//! [`BatchResult`] per domain to the output queue. Output order follows
//! completion, not input.

use crate::hsts::{parse_header_string, HstsHeader};
use crate::models::Issues;
use crate::runner::PreloadChecker;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

/// Default worker pool size
pub const DEFAULT_WORKERS: usize = 100;

/// Whether a domain whose first attempt reported errors is checked again
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryPolicy {
    #[default]
    Never,
    /// One more attempt; the second result is kept
    OnceOnError,
}

/// Which check each worker runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchMode {
    #[default]
    Preloadable,
    Removable,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub domain: String,
    /// Raw HSTS header, present only when exactly one was served
    pub header: Option<String>,
    pub parsed_header: Option<HstsHeader>,
    pub issues: Issues,
}

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub workers: usize,
    pub retry: RetryPolicy,
    pub mode: BatchMode,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            retry: RetryPolicy::Never,
            mode: BatchMode::Preloadable,
        }
    }
}

/// Start checking `domains` and return the result queue
///
/// The queue yields exactly `domains.len()` results and then closes.
pub fn spawn_batch(
    checker: Arc<PreloadChecker>,
    domains: Vec<String>,
    options: BatchOptions,
) -> mpsc::Receiver<BatchResult> {
    let total = domains.len();
    let workers = options.workers.max(1).min(total.max(1));
    info!("Checking {} domains with {} workers", total, workers);

    let (domain_tx, domain_rx) = mpsc::channel::<String>(workers);
    let (result_tx, result_rx) = mpsc::channel::<BatchResult>(workers);
    let domain_rx = Arc::new(Mutex::new(domain_rx));

    tokio::spawn(async move {
        for domain in domains {
            if domain_tx.send(domain).await.is_err() {
                break;
            }
        }
    });

    for id in 0..workers {
        let checker = Arc::clone(&checker);
        let domain_rx = Arc::clone(&domain_rx);
        let result_tx = result_tx.clone();

        tokio::spawn(async move {
            loop {
                // Hold the lock only while dequeuing
                let next = domain_rx.lock().await.recv().await;
                let Some(domain) = next else {
                    break;
                };

                debug!("Worker {} checking {}", id, domain);
                let result = check_with_retry(&checker, &domain, options).await;
                if result_tx.send(result).await.is_err() {
                    break;
                }
            }
        });
    }

    result_rx
}

/// Check every domain and collect the results
///
/// `on_result` is called as each result arrives.
pub async fn run_batch(
    checker: Arc<PreloadChecker>,
    domains: Vec<String>,
    options: BatchOptions,
    on_result: &dyn Fn(&BatchResult),
) -> Vec<BatchResult> {
    let total = domains.len();
    let mut results_rx = spawn_batch(checker, domains, options);

    let mut results = Vec::with_capacity(total);
    while results.len() < total {
        match results_rx.recv().await {
            Some(result) => {
                on_result(&result);
                results.push(result);
            }
            None => break,
        }
    }
    results
}

async fn check_with_retry(
    checker: &PreloadChecker,
    domain: &str,
    options: BatchOptions,
) -> BatchResult {
    let result = check_one(checker, domain, options.mode).await;
    if options.retry == RetryPolicy::OnceOnError && result.issues.has_errors() {
        debug!("Retrying {}", domain);
        return check_one(checker, domain, options.mode).await;
    }
    result
}

async fn check_one(checker: &PreloadChecker, domain: &str, mode: BatchMode) -> BatchResult {
    let (header, issues) = match mode {
        BatchMode::Preloadable => checker.preloadable_domain(domain).await,
        BatchMode::Removable => checker.removable_domain(domain).await,
    };
    let parsed_header = header.as_deref().map(|raw| parse_header_string(raw).0);

    BatchResult {
        domain: domain.to_string(),
        header,
        parsed_header,
        issues,
    }
}
