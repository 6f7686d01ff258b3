//! Memoized analyses for repeated source texts.
//!
//! Mapper directories often contain copies of the same statement. Entries
//! are keyed by the full text, and the oldest entry is dropped first once
//! the capacity is reached.

use std::sync::{LazyLock, RwLock};

use indexmap::IndexMap;

use crate::analysis::{SourceAnalysis, analyze_source};

/// Entries kept by the process-wide cache.
pub const DEFAULT_CAPACITY: usize = 1000;

static ANALYSIS_CACHE: LazyLock<RwLock<AnalysisCache>> =
    LazyLock::new(|| RwLock::new(AnalysisCache::new(DEFAULT_CAPACITY)));

/// Bounded map from source text to its analysis, in insertion order.
#[derive(Debug)]
pub struct AnalysisCache {
    entries:  IndexMap<String, SourceAnalysis>,
    capacity: usize
}

impl AnalysisCache {
    /// A capacity of zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            capacity
        }
    }

    pub fn get(&self, text: &str) -> Option<SourceAnalysis> {
        self.entries.get(text).cloned()
    }

    /// Store an analysis, evicting the oldest entry when a new text would
    /// exceed the capacity. Re-inserting a known text keeps its position.
    pub fn insert(&mut self, text: &str, analysis: SourceAnalysis) {
        if self.capacity == 0 {
            return;
        }
        if let Some(slot) = self.entries.get_mut(text) {
            *slot = analysis;
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(text.to_string(), analysis);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn get_cached(text: &str) -> Option<SourceAnalysis> {
    ANALYSIS_CACHE.read().ok()?.get(text)
}

pub fn cache_analysis(text: &str, analysis: SourceAnalysis) {
    if let Ok(mut cache) = ANALYSIS_CACHE.write() {
        cache.insert(text, analysis);
    }
}

/// Analyze a source text, reusing an earlier result for identical text.
pub fn analyze_source_cached(text: &str) -> SourceAnalysis {
    if let Some(cached) = get_cached(text) {
        return cached;
    }
    let analysis = analyze_source(text);
    cache_analysis(text, analysis.clone());
    analysis
}
