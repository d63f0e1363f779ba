//! JSON output formatter

use crate::hsts::HstsHeader;
use crate::models::Issues;
use crate::utils::Result;
use serde::Serialize;

/// JSON shape of a single domain or header check
#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub subject: &'a str,
    pub header: Option<&'a str>,
    pub parsed_header: Option<HstsHeader>,
    pub issues: &'a Issues,
}

/// Pretty-print any serializable value to stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
