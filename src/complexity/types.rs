//! Type definitions for complexity scoring.
//!
//! - [`Category`] - The closed set of scoring dimensions and their caps
//! - [`CategoryScores`] - Ordered per-category breakdown
//! - [`ComplexityTier`] - Six ordered bands for the 0-10 score
//! - [`ComplexityResult`] - Score, tier and breakdown for one query

use indexmap::IndexMap;
use serde::Serialize;

/// A scoring dimension.
///
/// The first six categories make up the plain query score. `DynamicComplexity` is only
/// attached by the template aggregator and does not take part in
/// normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Joins, subquery nesting, CTEs and set operators
    StructuralComplexity,
    /// Hierarchical queries, analytics, pivots, MODEL clause
    DialectSpecificFeatures,
    /// Aggregates, user-defined calls, CASE, regex functions
    FunctionsExpressions,
    /// Text length as a stand-in for data volume
    DataVolume,
    /// Sorting, grouping and deep plans
    ExecutionComplexity,
    /// Syntax and functions with no direct target equivalent
    ConversionRisk,
    /// Structural richness of a dynamic template
    DynamicComplexity
}

impl Category {
    /// Categories that make up a plain query score, in report order.
    pub const SCORED: [Category; 6] = [
        Self::StructuralComplexity,
        Self::DialectSpecificFeatures,
        Self::FunctionsExpressions,
        Self::DataVolume,
        Self::ExecutionComplexity,
        Self::ConversionRisk
    ];

    /// Upper bound of the category score.
    pub fn cap(self) -> f64 {
        match self {
            Self::StructuralComplexity => 3.5,
            Self::DialectSpecificFeatures => 3.0,
            Self::FunctionsExpressions => 2.0,
            Self::DataVolume => 2.0,
            Self::ExecutionComplexity => 1.5,
            Self::ConversionRisk => 2.0,
            Self::DynamicComplexity => 3.0
        }
    }

    /// Stable snake_case key used in reports.
    pub fn key(self) -> &'static str {
        match self {
            Self::StructuralComplexity => "structural_complexity",
            Self::DialectSpecificFeatures => "dialect_specific_features",
            Self::FunctionsExpressions => "functions_expressions",
            Self::DataVolume => "data_volume",
            Self::ExecutionComplexity => "execution_complexity",
            Self::ConversionRisk => "conversion_risk",
            Self::DynamicComplexity => "dynamic_complexity"
        }
    }

    /// Sum of the caps of all scored categories (14.0).
    pub fn scored_cap_total() -> f64 {
        Self::SCORED.iter().map(|c| c.cap()).sum()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-category scores in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryScores(IndexMap<Category, f64>);

impl CategoryScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw score, clamped to `[0, cap]`.
    pub fn insert_capped(&mut self, category: Category, raw: f64) {
        self.0.insert(category, raw.clamp(0.0, category.cap()));
    }

    /// Add an entry only when the category is absent.
    pub fn insert_if_absent(&mut self, category: Category, value: f64) {
        self.0.entry(category).or_insert(value);
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        self.0.get(&category).copied()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains_key(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over the scored categories only.
    pub fn scored_total(&self) -> f64 {
        Category::SCORED
            .iter()
            .filter_map(|c| self.get(*c))
            .sum()
    }
}

/// Complexity band for a 0-10 score.
///
/// Ordered from lowest to highest so reports can sort by tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    VerySimple,
    Simple,
    Moderate,
    Complex,
    VeryComplex,
    ExtremelyComplex
}

impl ComplexityTier {
    /// All tiers in ascending order.
    pub const ALL: [ComplexityTier; 6] = [
        Self::VerySimple,
        Self::Simple,
        Self::Moderate,
        Self::Complex,
        Self::VeryComplex,
        Self::ExtremelyComplex
    ];

    /// Classify a score. Band upper bounds are inclusive.
    pub fn classify(score: f64) -> Self {
        if score <= 1.0 {
            Self::VerySimple
        } else if score <= 3.0 {
            Self::Simple
        } else if score <= 5.0 {
            Self::Moderate
        } else if score <= 7.0 {
            Self::Complex
        } else if score <= 9.0 {
            Self::VeryComplex
        } else {
            Self::ExtremelyComplex
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VerySimple => "very simple",
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
            Self::VeryComplex => "very complex",
            Self::ExtremelyComplex => "extremely complex"
        }
    }
}

impl std::fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Scoring result for a single query text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityResult {
    /// Normalized score in `[0, 10]`, rounded to one decimal
    pub score:      f64,
    /// Band the score falls into
    pub tier:       ComplexityTier,
    /// Capped per-category scores
    pub categories: CategoryScores
}

impl ComplexityResult {
    /// Result substituted when scoring could not run.
    pub fn zeroed() -> Self {
        Self {
            score:      0.0,
            tier:       ComplexityTier::VerySimple,
            categories: CategoryScores::new()
        }
    }
}
