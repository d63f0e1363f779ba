//! hsts-preload - HSTS preload eligibility checker
//!
//! This tool provides functionality for:
//! - Checking a Strict-Transport-Security header value
//! - Checking whether a domain can be added to, or removed from, the preload list
//! - Batch checking many domains with a bounded worker pool

use clap::Parser;
use console::style;
use hsts_preload::batch::{self, BatchMode, BatchOptions, RetryPolicy};
use hsts_preload::checks::load_suffix_list;
use hsts_preload::cli::{normalize_domain, BatchArgs, Cli, Commands, HeaderArgs};
use hsts_preload::config::{load_settings, Settings};
use hsts_preload::hsts::{check_header_string, check_removable_header_string, parse_header_string};
use hsts_preload::models::Issues;
use hsts_preload::output::{
    print_batch_line, print_batch_summary, print_header, print_issues, print_json,
    print_parsed_header, print_verdict, JsonOutput,
};
use hsts_preload::utils::progress::{create_progress_bar, create_spinner};
use hsts_preload::{PreloadChecker, Result, ToolkitError};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Returns `false` when any error issue was reported
async fn run() -> Result<bool> {
    let cli = Cli::parse();

    // Handle color preference
    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Header(args) => run_header(&args, cli.json),
        Commands::Preloadable(args) => {
            let checker = build_checker(&settings).await?;
            let domain = args.normalized_domain();
            let spinner = (!cli.json).then(|| create_spinner(&format!("Checking {}...", domain)));
            let (header, issues) = checker.preloadable_domain(&domain).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            report_domain(&domain, header.as_deref(), &issues, cli.json)
        }
        Commands::Removable(args) => {
            let checker = build_checker(&settings).await?;
            let domain = args.normalized_domain();
            let (header, issues) = checker.removable_domain(&domain).await;
            report_domain(&domain, header.as_deref(), &issues, cli.json)
        }
        Commands::Batch(args) => run_batch(&args, &settings, cli.json).await,
    }
}

async fn build_checker(settings: &Settings) -> Result<PreloadChecker> {
    let suffixes = load_suffix_list(&settings.public_suffix, &settings.network).await?;
    PreloadChecker::from_settings(settings, Arc::new(suffixes))
}

fn run_header(args: &HeaderArgs, json: bool) -> Result<bool> {
    let issues = if args.removal {
        check_removable_header_string(&args.value)
    } else {
        check_header_string(&args.value)
    };
    let (parsed, _) = parse_header_string(&args.value);

    if json {
        print_json(&JsonOutput {
            subject: &args.value,
            header: Some(args.value.as_str()),
            parsed_header: Some(parsed),
            issues: &issues,
        })?;
    } else {
        print_header("Strict-Transport-Security");
        println!("  {}", style(&args.value).bold());
        print_parsed_header(&parsed);
        println!();
        print_issues(&issues);
        println!();
        print_verdict("Header", &issues);
    }

    Ok(!issues.has_errors())
}

fn report_domain(domain: &str, header: Option<&str>, issues: &Issues, json: bool) -> Result<bool> {
    if json {
        print_json(&JsonOutput {
            subject: domain,
            header,
            parsed_header: header.map(|raw| parse_header_string(raw).0),
            issues,
        })?;
    } else {
        print_header(domain);
        if let Some(raw) = header {
            println!("  Strict-Transport-Security: {}", style(raw).bold());
            println!();
        }
        print_issues(issues);
        println!();
        print_verdict(domain, issues);
    }

    Ok(!issues.has_errors())
}

async fn run_batch(args: &BatchArgs, settings: &Settings, json: bool) -> Result<bool> {
    let domains = read_domains(args.file.as_deref())?;
    if domains.is_empty() {
        return Err(ToolkitError::Input {
            message: "No domains found in input".to_string(),
        });
    }

    let checker = Arc::new(build_checker(settings).await?);
    let options = BatchOptions {
        workers: args.workers.unwrap_or(settings.batch.workers),
        retry: if args.retry {
            RetryPolicy::OnceOnError
        } else {
            settings.batch.retry
        },
        mode: if args.removal {
            BatchMode::Removable
        } else {
            BatchMode::Preloadable
        },
    };

    let pb = create_progress_bar(domains.len() as u64, "Checking domains");
    if json {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    let results = batch::run_batch(checker, domains, options, &|_: &batch::BatchResult| pb.inc(1)).await;
    pb.finish_and_clear();

    let all_ok = results.iter().all(|r| !r.issues.has_errors());
    let display: Vec<_> = results
        .iter()
        .filter(|r| !args.issues_only || r.issues.has_errors())
        .collect();

    if json {
        print_json(&display)?;
    } else {
        println!();
        for result in &display {
            print_batch_line(result);
        }
        println!();
        print_batch_summary(&results);
    }

    Ok(all_ok)
}

/// One domain per line; blank lines and `#` comments are skipped
fn read_domains(file: Option<&Path>) -> Result<Vec<String>> {
    let reader: Box<dyn Read> = match file {
        Some(path) => Box::new(std::fs::File::open(path).map_err(|e| ToolkitError::Input {
            message: format!("Failed to open {}: {}", path.display(), e),
        })?),
        None => Box::new(std::io::stdin()),
    };

    let mut domains = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        domains.push(normalize_domain(trimmed));
    }
    Ok(domains)
}
