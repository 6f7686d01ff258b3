//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-migration.toml` in current directory
//! 4. `~/.config/sql-migration-analyzer/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [scan]
//! extensions = ["sql", "xml"]
//! follow_links = false
//! max_file_size = 1048576
//!
//! [report]
//! title = "Oracle to PostgreSQL migration report"
//! format = "markdown"          # text, json, yaml, markdown
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQL_MIGRATION_EXTENSIONS` | Comma-separated file extensions to scan |
//! | `SQL_MIGRATION_FORMAT` | Default output format |

use std::{env, fs, path::PathBuf};

use serde::Deserialize;

use crate::error::{AppResult, config_error};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scan:   ScanConfig,
    #[serde(default)]
    pub report: ReportConfig
}

/// Directory scan configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to analyze, without the leading dot
    pub extensions:    Vec<String>,
    /// Follow symbolic links while walking
    pub follow_links:  bool,
    /// Files larger than this many bytes are reported as errors
    pub max_file_size: u64
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions:    vec![String::from("sql")],
            follow_links:  false,
            max_file_size: 1024 * 1024
        }
    }
}

impl ScanConfig {
    /// Whether a file name carries one of the configured extensions
    pub fn matches_extension(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}

/// Report configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Heading of rendered batch reports
    pub title:  String,
    /// Output format used when none is given on the command line
    pub format: Option<String>
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title:  String::from("SQL Migration Complexity Report"),
            format: None
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-migration.toml)
    /// 3. Config file in home directory
    ///    (~/.config/sql-migration-analyzer/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        // Try to load from home directory config
        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-migration-analyzer")
                .join("config.toml");

            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Try to load from current directory config (overrides home config)
        let local_config = PathBuf::from(".sql-migration.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        // Override with environment variables
        if let Ok(extensions) = env::var("SQL_MIGRATION_EXTENSIONS") {
            config.scan.extensions = parse_extensions(&extensions);
        }

        if let Ok(format) = env::var("SQL_MIGRATION_FORMAT") {
            config.report.format = Some(format);
        }

        Ok(config)
    }

    /// Parse a single configuration file
    pub fn from_file(path: &std::path::Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }
}

/// Split a comma-separated extension list, dropping blanks and leading dots
pub fn parse_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(|e| e.trim().trim_start_matches('.').to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_parse_extensions() {
        assert_eq!(parse_extensions("sql, .xml,,"), vec!["sql", "xml"]);
        assert!(parse_extensions(" , ").is_empty());
    }

    #[test]
    fn test_matches_extension() {
        let scan = ScanConfig {
            extensions: vec!["sql".into(), ".xml".into()],
            ..Default::default()
        };
        assert!(scan.matches_extension(Path::new("a/b/query.SQL")));
        assert!(scan.matches_extension(Path::new("mapper.xml")));
        assert!(!scan.matches_extension(Path::new("notes.txt")));
        assert!(!scan.matches_extension(Path::new("Makefile")));
    }

    #[test]
    fn test_from_toml_partial_sections() {
        let config = Config::from_toml("[scan]\nextensions = [\"xml\"]\n").unwrap();
        assert_eq!(config.scan.extensions, vec!["xml"]);
        assert_eq!(config.scan.max_file_size, 1024 * 1024);
        assert_eq!(config.report.title, "SQL Migration Complexity Report");
    }

    #[test]
    fn test_from_toml_invalid() {
        assert!(Config::from_toml("[scan\nextensions = 1").is_err());
    }
}
