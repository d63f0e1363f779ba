//! Terminal output formatting

use crate::batch::BatchResult;
use crate::hsts::HstsHeader;
use crate::models::Issues;
use crate::utils::progress::{print_fail, print_pass, print_warning};
use console::style;

/// Print section header
pub fn print_header(title: &str) {
    println!();
    println!("{}", style(format!("━━━ {} ━━━", title)).cyan().bold());
    println!();
}

/// Print every error then every warning, in reporting order
pub fn print_issues(issues: &Issues) {
    if issues.is_empty() {
        print_pass("No issues found");
        return;
    }

    for issue in &issues.errors {
        print_fail(&format!(
            "{} {}",
            style(&issue.summary).red().bold(),
            style(format!("[{}]", issue.code)).dim()
        ));
        println!("      {}", issue.message);
    }
    for issue in &issues.warnings {
        print_warning(&format!(
            "{} {}",
            style(&issue.summary).yellow().bold(),
            style(format!("[{}]", issue.code)).dim()
        ));
        println!("      {}", issue.message);
    }
}

/// Print the verdict line for one domain or header
pub fn print_verdict(subject: &str, issues: &Issues) {
    let verdict = if issues.has_errors() {
        style("not eligible").red().bold()
    } else {
        style("eligible").green().bold()
    };
    println!(
        "{} is {} ({} errors, {} warnings)",
        style(subject).bold(),
        verdict,
        issues.errors.len(),
        issues.warnings.len()
    );
}

pub fn print_parsed_header(header: &HstsHeader) {
    let max_age = header
        .max_age()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "absent".to_string());
    println!("  max-age:           {}", max_age);
    println!("  includeSubDomains: {}", header.include_sub_domains());
    println!("  preload:           {}", header.preload());
}

/// One line per domain
pub fn print_batch_line(result: &BatchResult) {
    let status = if result.issues.has_errors() {
        style("✗").red().to_string()
    } else if !result.issues.warnings.is_empty() {
        style("⚠").yellow().to_string()
    } else {
        style("✓").green().to_string()
    };

    let first_error = result
        .issues
        .errors
        .first()
        .map(|e| format!(" - {}", e.summary))
        .unwrap_or_default();

    println!(
        "  {} {}{}",
        status,
        style(&result.domain).bold(),
        style(first_error).red().dim()
    );
}

pub fn print_batch_summary(results: &[BatchResult]) {
    let total = results.len();
    let failed = results.iter().filter(|r| r.issues.has_errors()).count();
    let with_warnings = results
        .iter()
        .filter(|r| !r.issues.has_errors() && !r.issues.warnings.is_empty())
        .count();

    print_header("Batch Check Summary");
    println!("  Total domains checked: {}", style(total).bold());
    println!("  Eligible: {}", style(total - failed).green());
    println!("  Eligible with warnings: {}", style(with_warnings).yellow());
    println!("  Not eligible: {}", style(failed).red());
}
