use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// SQL Migration Analyzer - Estimate Oracle to PostgreSQL migration effort
#[derive(Parser, Debug)]
#[command(name = "sql-migration-analyzer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a single SQL query
    Query {
        /// Path to SQL file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        common: CommonArgs
    },

    /// Score a MyBatis statement template
    Template {
        /// Path to XML file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        common: CommonArgs
    },

    /// Analyze every matching file under a directory
    Scan {
        /// Directory to scan
        dir: PathBuf,

        /// Comma-separated file extensions (e.g. sql,xml)
        #[arg(short, long)]
        extensions: Option<String>,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs
    }
}

/// Flags shared by all subcommands
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<Format>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Show extracted signals and reduced SQL
    #[arg(short, long)]
    pub verbose: bool
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Self::Query {
                common, ..
            }
            | Self::Template {
                common, ..
            }
            | Self::Scan {
                common, ..
            } => common
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml,
    Markdown
}
