//! # SQL Migration Analyzer
//!
//! Heuristic effort estimation for moving SQL from Oracle to PostgreSQL.
//!
//! `sql-migration-analyzer` scores each query from 0 to 10 by looking for
//! structural weight (joins, subqueries, CTEs, set operators), Oracle-only
//! syntax and functions, expected data volume and execution cost. MyBatis
//! mapper statements are reduced to a base and a worst-case SQL text first;
//! the nesting of `<if>`, `<choose>` and `<foreach>` adds to the score.
//!
//! # Quick Start
//!
//! ```bash
//! # Score one query
//! sql-migration-analyzer query -i report.sql
//!
//! # Score a MyBatis statement from stdin as JSON
//! cat findEmployees.xml | sql-migration-analyzer template -i - -f json
//!
//! # Scan a project and write a Markdown report
//! sql-migration-analyzer scan ./src/main/resources -e sql,xml -f markdown -o report.md
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. Command-line arguments
//! 2. Environment variables (`SQL_MIGRATION_EXTENSIONS`, `SQL_MIGRATION_FORMAT`)
//! 3. `.sql-migration.toml` in current directory
//! 4. `~/.config/sql-migration-analyzer/config.toml`
//!
//! Log output is controlled with `RUST_LOG` (default `warn`, `--verbose`
//! raises it to `debug`).
//!
//! # Exit Codes
//!
//! - `0` - Success
//! - `1` - Some input could not be analyzed, or the command failed
//!
//! # Output Formats
//!
//! - `text` - Human-readable colored output (default)
//! - `json` - Structured JSON for programmatic processing
//! - `yaml` - YAML format
//! - `markdown` - Report layout suitable for migration planning documents

use std::process;

use clap::Parser;
use sql_migration_analyzer::{
    app::{CommandOutput, InputParams, ScanParams, run_query, run_scan, run_template},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.command.common().verbose);
    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> AppResult<i32> {
    let config = Config::load()?;

    let output = match cli.command {
        Commands::Query {
            input,
            common
        } => run_query(
            InputParams {
                input_path: input.display().to_string(),
                format:     common.format,
                no_color:   common.no_color,
                verbose:    common.verbose
            },
            &config
        )?,
        Commands::Template {
            input,
            common
        } => run_template(
            InputParams {
                input_path: input.display().to_string(),
                format:     common.format,
                no_color:   common.no_color,
                verbose:    common.verbose
            },
            &config
        )?,
        Commands::Scan {
            dir,
            extensions,
            output,
            common
        } => run_scan(
            ScanParams {
                dir: dir.display().to_string(),
                extensions,
                output_path: output.map(|p| p.display().to_string()),
                format: common.format,
                no_color: common.no_color,
                verbose: common.verbose
            },
            &config
        )?
    };

    Ok(print_output(output))
}

fn print_output(output: CommandOutput) -> i32 {
    for line in &output.stdout {
        println!("{}", line);
    }
    output.exit_code
}
