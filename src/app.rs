//! Application logic for the SQL Migration Analyzer CLI.
//!
//! This module contains the command runners separated from the main entry
//! point to enable testing.

mod analyze;
mod convert;
mod helpers;
mod types;

pub use analyze::{run_query, run_scan, run_template};
pub use convert::{convert_format, parse_format_name};
pub use helpers::{
    calculate_exit_code, create_output_options, effective_format, read_source_input, write_report
};
pub use types::{CommandOutput, InputParams, ScanParams};
