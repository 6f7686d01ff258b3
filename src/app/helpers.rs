//! Helper functions for CLI operations.
//!
//! Input reading, exit code calculation, output option assembly and report
//! writing shared by the command runners.

use std::{
    fs::{read_to_string, write},
    io::{self, Read}
};

use super::convert::{convert_format, parse_format_name};
use crate::{
    batch::BatchReport,
    cli::Format,
    config::Config,
    error::{AppResult, empty_input_error, file_read_error, report_write_error},
    output::OutputOptions
};

/// Calculates the process exit code for a batch report.
///
/// Returns `1` when any file failed and `0` otherwise.
///
/// # Example
///
/// ```
/// use sql_migration_analyzer::{app::calculate_exit_code, batch::BatchReport};
///
/// let report = BatchReport::from_files(Vec::new());
/// assert_eq!(calculate_exit_code(&report), 0);
/// ```
pub fn calculate_exit_code(report: &BatchReport) -> i32 {
    if report.error_count > 0 { 1 } else { 0 }
}

/// Reads source text from a file or stdin.
///
/// Supports reading from a file path or from standard input when the
/// path is "-".
///
/// # Errors
///
/// Returns an error if reading fails or the input is blank.
pub fn read_source_input(path: &str) -> AppResult<String> {
    let content = if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        buffer
    } else {
        read_to_string(path).map_err(|e| file_read_error(path, e))?
    };
    if content.trim().is_empty() {
        let source = if path == "-" { "stdin" } else { path };
        return Err(empty_input_error(source));
    }
    Ok(content)
}

/// Picks the output format: command line first, then configuration, then
/// plain text.
///
/// # Errors
///
/// Returns an error when the configured format name is unknown.
pub fn effective_format(cli_format: Option<Format>, config: &Config) -> AppResult<Format> {
    match (cli_format, config.report.format.as_deref()) {
        (Some(format), _) => Ok(format),
        (None, Some(name)) => parse_format_name(name),
        (None, None) => Ok(Format::Text)
    }
}

/// Creates output options from CLI parameters.
pub fn create_output_options(format: Format, no_color: bool, verbose: bool) -> OutputOptions {
    OutputOptions {
        format: convert_format(format),
        colored: !no_color,
        verbose
    }
}

/// Writes a rendered report to `path`.
pub fn write_report(path: &str, content: &str) -> AppResult<()> {
    write(path, content).map_err(|e| report_write_error(path, e))
}
