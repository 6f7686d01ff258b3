//! Conversions from CLI-facing types to internal types.

use clap::ValueEnum;

use crate::{
    cli::Format,
    error::{AppResult, config_error},
    output::OutputFormat
};

/// Converts a CLI format enum to the internal output format type.
///
/// # Example
///
/// ```
/// use sql_migration_analyzer::{app::convert_format, cli::Format, output::OutputFormat};
///
/// let format = convert_format(Format::Markdown);
/// assert!(matches!(format, OutputFormat::Markdown));
/// ```
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml,
        Format::Markdown => OutputFormat::Markdown
    }
}

/// Parses a format name from configuration (case-insensitive).
///
/// # Errors
///
/// Returns a configuration error for unknown names.
pub fn parse_format_name(name: &str) -> AppResult<Format> {
    Format::from_str(name.trim(), true).map_err(|_| {
        config_error(format!(
            "Unknown output format '{}' (expected text, json, yaml or markdown)",
            name
        ))
    })
}
