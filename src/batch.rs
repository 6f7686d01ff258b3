//! Directory-wide batch analysis.
//!
//! Walks a directory tree, picks files by extension and analyzes each one in
//! parallel using [`rayon`]. A file that cannot be read is recorded in the
//! report instead of aborting the run.
//!
//! ```text
//! ┌───────────┐     ┌──────────────┐     ┌─────────────┐
//! │  WalkDir  │────▶│  par_iter    │────▶│ BatchReport │
//! └───────────┘     │ analyze_file │     └─────────────┘
//!                   └──────────────┘
//! ```

use std::{
    fs,
    path::{Path, PathBuf}
};

use compact_str::CompactString;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{
    analysis::SourceAnalysis,
    cache::analyze_source_cached,
    complexity::ComplexityTier,
    config::ScanConfig,
    error::{AppResult, directory_error}
};

/// Outcome of analyzing one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Analyzed { analysis: SourceAnalysis },
    Failed { error: String }
}

/// Per-file entry of a batch report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path:      PathBuf,
    pub file_name: CompactString,
    pub outcome:   FileOutcome
}

impl FileReport {
    pub fn analysis(&self) -> Option<&SourceAnalysis> {
        match &self.outcome {
            FileOutcome::Analyzed {
                analysis
            } => Some(analysis),
            FileOutcome::Failed {
                ..
            } => None
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            FileOutcome::Failed {
                error
            } => Some(error),
            FileOutcome::Analyzed {
                ..
            } => None
        }
    }
}

/// Aggregated results for a directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    /// Analyzed files by descending score, followed by failed files
    pub files:          Vec<FileReport>,
    pub template_count: usize,
    pub query_count:    usize,
    pub error_count:    usize,
    /// Analyzed files per tier, only tiers that occur, in tier order
    pub tier_counts:    IndexMap<ComplexityTier, usize>
}

impl BatchReport {
    /// Build a report from unordered per-file entries.
    pub fn from_files(mut files: Vec<FileReport>) -> Self {
        let mut template_count = 0;
        let mut query_count = 0;
        let mut error_count = 0;
        let mut tier_counts: IndexMap<ComplexityTier, usize> = IndexMap::new();
        for file in &files {
            match file.analysis() {
                Some(analysis) => {
                    if analysis.is_template() {
                        template_count += 1;
                    } else {
                        query_count += 1;
                    }
                    *tier_counts.entry(analysis.tier()).or_insert(0) += 1;
                }
                None => error_count += 1
            }
        }
        tier_counts.sort_keys();
        files.sort_by(|a, b| match (a.analysis(), b.analysis()) {
            (Some(x), Some(y)) => y
                .score()
                .total_cmp(&x.score())
                .then_with(|| a.path.cmp(&b.path)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.path.cmp(&b.path)
        });
        Self {
            files,
            template_count,
            query_count,
            error_count,
            tier_counts
        }
    }

    /// Number of successfully analyzed files.
    pub fn analyzed_count(&self) -> usize {
        self.template_count + self.query_count
    }

    /// Share of analyzed files in `tier`, in percent.
    pub fn tier_percentage(&self, tier: ComplexityTier) -> f64 {
        let analyzed = self.analyzed_count();
        if analyzed == 0 {
            return 0.0;
        }
        let count = self.tier_counts.get(&tier).copied().unwrap_or(0);
        count as f64 * 100.0 / analyzed as f64
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.error().is_some())
    }
}

/// Collect candidate files under `root`, sorted by path.
pub fn discover_files(root: &Path, scan: &ScanConfig) -> AppResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(directory_error(
            &root.display().to_string(),
            "not a directory"
        ));
    }
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(scan.follow_links)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && scan.matches_extension(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    paths.sort();
    debug!(root = %root.display(), files = paths.len(), "discovered files");
    Ok(paths)
}

/// Analyze every matching file under `root` (parallel).
pub fn scan_directory(root: &Path, scan: &ScanConfig) -> AppResult<BatchReport> {
    let paths = discover_files(root, scan)?;
    let files: Vec<FileReport> = paths
        .par_iter()
        .map(|path| analyze_file(path, scan.max_file_size))
        .collect();
    Ok(BatchReport::from_files(files))
}

/// Analyze a single file, recording failures in the returned entry.
pub fn analyze_file(path: &Path, max_file_size: u64) -> FileReport {
    let file_name: CompactString = path
        .file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_default();
    let outcome = match read_source(path, max_file_size) {
        Ok(content) => FileOutcome::Analyzed {
            analysis: analyze_source_cached(&content)
        },
        Err(error) => {
            warn!(path = %path.display(), "{}", error);
            FileOutcome::Failed {
                error
            }
        }
    };
    FileReport {
        path: path.to_path_buf(),
        file_name,
        outcome
    }
}

fn read_source(path: &Path, max_file_size: u64) -> Result<String, String> {
    let display = path.display().to_string();
    let size = fs::metadata(path)
        .map_err(|e| format!("Failed to read file '{}': {}", display, e))?
        .len();
    if size > max_file_size {
        return Err(format!(
            "File '{}' is {} bytes, larger than the {} byte limit",
            display, size, max_file_size
        ));
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file '{}': {}", display, e))?;
    if content.trim().is_empty() {
        return Err(format!("File '{}' contains no SQL text", display));
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complexity::score_query;

    fn analyzed(path: &str, sql: &str) -> FileReport {
        FileReport {
            path:      PathBuf::from(path),
            file_name: path.into(),
            outcome:   FileOutcome::Analyzed {
                analysis: SourceAnalysis::Query(score_query(sql))
            }
        }
    }

    fn failed(path: &str) -> FileReport {
        FileReport {
            path:      PathBuf::from(path),
            file_name: path.into(),
            outcome:   FileOutcome::Failed {
                error: "boom".to_string()
            }
        }
    }

    #[test]
    fn test_report_orders_by_score_then_errors() {
        let report = BatchReport::from_files(vec![
            failed("z.sql"),
            analyzed("a.sql", "SELECT 1 FROM DUAL"),
            analyzed(
                "b.sql",
                "SELECT A FROM T JOIN U ON 1 = 1 CONNECT BY PRIOR A = B ORDER BY A"
            ),
        ]);
        let names: Vec<_> = report.files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["b.sql", "a.sql", "z.sql"]);
        assert_eq!(report.query_count, 2);
        assert_eq!(report.error_count, 1);
        assert_eq!(report.analyzed_count(), 2);
    }

    #[test]
    fn test_tier_counts_sorted_and_percentages() {
        let report = BatchReport::from_files(vec![
            analyzed("a.sql", "SELECT 1 FROM DUAL"),
            analyzed("b.sql", "SELECT 2 FROM DUAL"),
        ]);
        assert_eq!(report.tier_counts.get(&ComplexityTier::VerySimple), Some(&2));
        assert_eq!(report.tier_percentage(ComplexityTier::VerySimple), 100.0);
        assert_eq!(report.tier_percentage(ComplexityTier::Complex), 0.0);
    }

    #[test]
    fn test_empty_report_percentage() {
        let report = BatchReport::from_files(vec![failed("x.sql")]);
        assert_eq!(report.tier_percentage(ComplexityTier::Simple), 0.0);
        assert_eq!(report.failed().count(), 1);
    }
}
