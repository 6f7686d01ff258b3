//! Template aggregation and source dispatch.
//!
//! [`score_template`] combines the reducer with the plain scorer: both the
//! base and the worst-case text are scored, and the final score is the
//! worst-case score plus half of the dynamic contribution.
//!
//! [`analyze_source`] decides whether a text is a template and routes it to
//! the matching path.

use std::{
    panic::{self, AssertUnwindSafe},
    sync::LazyLock
};

use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::{
    complexity::{
        Category, CategoryScores, ComplexityResult, ComplexityTier, round_one, score_query
    },
    template::{TagTally, reduce_template}
};

/// Opening tag of a MyBatis statement element.
static STATEMENT_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*(select|insert|update|delete)[\s>]").expect("valid regex")
});

/// Weight of the dynamic contribution in the final score.
const DYNAMIC_WEIGHT: f64 = 0.5;

/// Scores for a MyBatis template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateAnalysis {
    pub base_text:          String,
    pub worst_case_text:    String,
    pub base_score:         f64,
    pub worst_case_score:   f64,
    pub dynamic_complexity: f64,
    pub final_score:        f64,
    pub tier:               ComplexityTier,
    /// Worst-case breakdown, always including `dynamic_complexity`
    pub categories:         CategoryScores,
    pub tally:              TagTally
}

/// Result of analyzing one source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceAnalysis {
    Query(ComplexityResult),
    Template(TemplateAnalysis)
}

impl SourceAnalysis {
    /// Headline score.
    pub fn score(&self) -> f64 {
        match self {
            Self::Query(r) => r.score,
            Self::Template(t) => t.final_score
        }
    }

    pub fn tier(&self) -> ComplexityTier {
        match self {
            Self::Query(r) => r.tier,
            Self::Template(t) => t.tier
        }
    }

    pub fn categories(&self) -> &CategoryScores {
        match self {
            Self::Query(r) => &r.categories,
            Self::Template(t) => &t.categories
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Self::Template(_))
    }
}

/// Whether a text looks like a MyBatis statement template.
pub fn is_template(text: &str) -> bool {
    STATEMENT_TAG_REGEX.is_match(text)
}

/// Analyze a text as a template or as plain SQL.
pub fn analyze_source(text: &str) -> SourceAnalysis {
    if is_template(text) {
        SourceAnalysis::Template(score_template(text))
    } else {
        SourceAnalysis::Query(score_query(text))
    }
}

/// Score a MyBatis template.
///
/// A sub-score that panics is replaced by a zero score with an empty
/// breakdown; the analysis as a whole still completes.
pub fn score_template(xml: &str) -> TemplateAnalysis {
    let reduction = reduce_template(xml);
    let base = guarded("base", || score_query(&reduction.base_text));
    let worst_case = guarded("worst-case", || score_query(&reduction.worst_case_text));
    let mut categories = worst_case.categories;
    categories.insert_if_absent(Category::DynamicComplexity, reduction.dynamic_complexity);
    let final_score =
        round_one((worst_case.score + reduction.dynamic_complexity * DYNAMIC_WEIGHT).min(10.0));
    TemplateAnalysis {
        base_text: reduction.base_text,
        worst_case_text: reduction.worst_case_text,
        base_score: base.score,
        worst_case_score: worst_case.score,
        dynamic_complexity: reduction.dynamic_complexity,
        final_score,
        tier: ComplexityTier::classify(final_score),
        categories,
        tally: reduction.tally
    }
}

/// Run one sub-score, substituting a zero result if it panics.
fn guarded<F>(variant: &str, score: F) -> ComplexityResult
where
    F: FnOnce() -> ComplexityResult
{
    panic::catch_unwind(AssertUnwindSafe(score)).unwrap_or_else(|_| {
        warn!("scoring the {} query failed, using zero", variant);
        ComplexityResult::zeroed()
    })
}
