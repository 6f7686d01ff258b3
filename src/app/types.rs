//! Application types for CLI commands.

use crate::cli::Format;

/// Parameters for the `query` and `template` commands.
///
/// # Example
///
/// ```
/// use sql_migration_analyzer::app::InputParams;
///
/// let params = InputParams {
///     input_path: "query.sql".to_string(),
///     format:     None,
///     no_color:   true,
///     verbose:    false
/// };
/// assert_eq!(params.input_path, "query.sql");
/// ```
#[derive(Debug, Clone)]
pub struct InputParams {
    /// Path to the source file or "-" for stdin input.
    pub input_path: String,
    /// Output format; falls back to configuration when absent.
    pub format:     Option<Format>,
    /// Disable colored terminal output.
    pub no_color:   bool,
    /// Show extracted signals and reduced SQL.
    pub verbose:    bool
}

/// Parameters for the `scan` command.
#[derive(Debug, Clone)]
pub struct ScanParams {
    /// Directory to walk.
    pub dir:         String,
    /// Comma-separated extension override.
    pub extensions:  Option<String>,
    /// Report file; stdout when absent.
    pub output_path: Option<String>,
    pub format:      Option<Format>,
    pub no_color:    bool,
    pub verbose:     bool
}

/// Output from CLI command execution.
///
/// # Example
///
/// ```
/// use sql_migration_analyzer::app::CommandOutput;
///
/// let output = CommandOutput {
///     exit_code: 0,
///     stdout:    vec!["Score: 0.4/10 (very simple)".to_string()]
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code for the process (0=success, 1=some file failed).
    pub exit_code: i32,
    /// Lines to print to stdout.
    pub stdout:    Vec<String>
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_params_clone() {
        let params = InputParams {
            input_path: "mapper.xml".to_string(),
            format:     Some(Format::Json),
            no_color:   false,
            verbose:    true
        };
        let cloned = params.clone();
        assert_eq!(cloned.input_path, "mapper.xml");
        assert_eq!(cloned.format, Some(Format::Json));
    }

    #[test]
    fn test_scan_params_debug() {
        let params = ScanParams {
            dir:         "queries".to_string(),
            extensions:  Some("sql,xml".to_string()),
            output_path: None,
            format:      None,
            no_color:    true,
            verbose:     false
        };
        assert!(format!("{:?}", params).contains("ScanParams"));
    }

    #[test]
    fn test_command_output_clone() {
        let output = CommandOutput {
            exit_code: 1,
            stdout:    vec!["error".to_string()]
        };
        let cloned = output.clone();
        assert_eq!(cloned.exit_code, 1);
        assert_eq!(cloned.stdout.len(), 1);
    }
}
