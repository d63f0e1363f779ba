//! Output formatting module
//!
//! Provides colored terminal output and JSON export.

pub mod json;
pub mod terminal;

pub use json::{print_json, JsonOutput};
pub use terminal::{
    print_batch_line, print_batch_summary, print_header, print_issues, print_parsed_header,
    print_verdict,
};
