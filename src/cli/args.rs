//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hsts-preload")]
#[command(version)]
#[command(about = "Check whether a domain is eligible for the HSTS preload list", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a TOML settings file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a Strict-Transport-Security header value
    Header(HeaderArgs),

    /// Check whether a domain can be added to the preload list
    Preloadable(DomainArgs),

    /// Check whether a domain can be removed from the preload list
    Removable(DomainArgs),

    /// Check many domains, one per line
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
pub struct HeaderArgs {
    /// Header value, e.g. "max-age=31536000; includeSubDomains; preload"
    #[arg(required = true)]
    pub value: String,

    /// Check against the removal requirements instead
    #[arg(long)]
    pub removal: bool,
}

#[derive(Args, Debug)]
pub struct DomainArgs {
    /// Domain to check
    #[arg(required = true)]
    pub domain: String,
}

impl DomainArgs {
    /// Lowercased host with any scheme, path or port stripped
    pub fn normalized_domain(&self) -> String {
        normalize_domain(&self.domain)
    }
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// File with one domain per line; stdin when omitted
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Check for removal instead of addition
    #[arg(long)]
    pub removal: bool,

    /// Number of concurrent workers (overrides the settings file)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Retry a domain once when its first check reports errors
    #[arg(long)]
    pub retry: bool,

    /// Only show domains with errors
    #[arg(long)]
    pub issues_only: bool,
}

pub fn normalize_domain(input: &str) -> String {
    let trimmed = input.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    host.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plain() {
        assert_eq!(normalize_domain("Example.COM"), "example.com");
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_domain("https://Example.com:8443/path?q=1"), "example.com");
        assert_eq!(normalize_domain("  http://example.org/ "), "example.org");
    }

    #[test]
    fn test_normalize_keeps_bad_input_for_format_check() {
        assert_eq!(normalize_domain(".example.com."), ".example.com.");
    }
}
