//! Command runners.
//!
//! Each runner reads its input, scores it and renders the result. Nothing is
//! printed here; the caller decides where [`CommandOutput`] goes.

use std::{path::Path, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::{
    helpers::{
        calculate_exit_code, create_output_options, effective_format, read_source_input,
        write_report
    },
    types::{CommandOutput, InputParams, ScanParams}
};
use crate::{
    analysis::{SourceAnalysis, score_template},
    batch::scan_directory,
    complexity::score_query,
    config::{Config, parse_extensions},
    error::{AppResult, config_error},
    output::{format_analysis, format_batch_report}
};

/// Scores a single SQL query.
///
/// The input is always treated as plain SQL, even when it contains
/// markup.
///
/// # Example
///
/// ```no_run
/// use sql_migration_analyzer::{
///     app::{InputParams, run_query},
///     config::Config
/// };
///
/// let params = InputParams {
///     input_path: "query.sql".to_string(),
///     format:     None,
///     no_color:   false,
///     verbose:    false
/// };
/// let output = run_query(params, &Config::default()).unwrap();
/// println!("Exit code: {}", output.exit_code);
/// ```
pub fn run_query(params: InputParams, config: &Config) -> AppResult<CommandOutput> {
    let sql = read_source_input(&params.input_path)?;
    let analysis = SourceAnalysis::Query(score_query(&sql));
    render_single(&sql, &analysis, &params, config)
}

/// Scores a MyBatis statement template.
///
/// Markup that fails to parse still produces a (minimal) score.
pub fn run_template(params: InputParams, config: &Config) -> AppResult<CommandOutput> {
    let xml = read_source_input(&params.input_path)?;
    let analysis = SourceAnalysis::Template(score_template(&xml));
    render_single(&xml, &analysis, &params, config)
}

fn render_single(
    source: &str,
    analysis: &SourceAnalysis,
    params: &InputParams,
    config: &Config
) -> AppResult<CommandOutput> {
    let format = effective_format(params.format, config)?;
    let opts = create_output_options(format, params.no_color, params.verbose);
    Ok(CommandOutput {
        exit_code: 0,
        stdout:    vec![format_analysis(source, analysis, &opts)]
    })
}

/// Analyzes every matching file under a directory.
///
/// Files that cannot be analyzed are listed in the report and turn the
/// exit code to `1`. When an output path is given the report goes to that
/// file and stdout carries a one-line summary.
pub fn run_scan(params: ScanParams, config: &Config) -> AppResult<CommandOutput> {
    let mut scan = config.scan.clone();
    if let Some(list) = params.extensions.as_deref() {
        scan.extensions = parse_extensions(list);
    }
    if scan.extensions.is_empty() {
        return Err(config_error("No file extensions to scan"));
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Scanning {}...", params.dir));
    pb.enable_steady_tick(Duration::from_millis(100));
    let report = scan_directory(Path::new(&params.dir), &scan);
    pb.finish_and_clear();
    let report = report?;

    info!(
        files = report.files.len(),
        errors = report.error_count,
        "scan finished"
    );

    let format = effective_format(params.format, config)?;
    let colored = !params.no_color && params.output_path.is_none();
    let opts = create_output_options(format, !colored, params.verbose);
    let rendered = format_batch_report(&report, &config.report.title, &opts);
    let exit_code = calculate_exit_code(&report);

    let stdout = match params.output_path.as_deref() {
        Some(path) => {
            write_report(path, &rendered)?;
            vec![format!(
                "Report written to {} ({} files, {} errors)",
                path,
                report.files.len(),
                report.error_count
            )]
        }
        None => vec![rendered]
    };

    Ok(CommandOutput {
        exit_code,
        stdout
    })
}
