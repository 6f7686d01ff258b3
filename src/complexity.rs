//! Migration complexity scoring for plain SQL text.
//!
//! Scoring runs in two steps:
//!
//! 1. **Feature extraction** - regex pattern tables over the trimmed,
//!    upper-cased text produce raw counts and flags ([`QueryFeatures`])
//! 2. **Composition** - features map to six capped [`Category`] scores which
//!    are normalized to a 0-10 scale and classified into a
//!    [`ComplexityTier`]
//!
//! ```text
//! ┌──────────┐     ┌───────────┐     ┌──────────┐     ┌─────────────┐
//! │  Query   │────▶│ Features  │────▶│ Composer │────▶│   Result    │
//! └──────────┘     └───────────┘     └──────────┘     └─────────────┘
//! ```
//!
//! The scorer never fails. Text that is not SQL at all simply produces low
//! counts.
//!
//! # Example
//!
//! ```
//! use sql_migration_analyzer::complexity::{Category, ComplexityTier, score_query};
//!
//! let result = score_query("SELECT id FROM t");
//! assert_eq!(result.tier, ComplexityTier::VerySimple);
//! assert_eq!(result.categories.get(Category::StructuralComplexity), Some(0.0));
//! ```

mod features;
pub mod patterns;
mod types;

pub use features::{QueryFeatures, estimate_joins, extract_features, normalize, subquery_depth};
pub use types::{Category, CategoryScores, ComplexityResult, ComplexityTier};

/// Score a query text.
pub fn score_query(query: &str) -> ComplexityResult {
    score_query_with_features(query).0
}

/// Score a query text and keep the extracted features.
pub fn score_query_with_features(query: &str) -> (ComplexityResult, QueryFeatures) {
    let text = normalize(query);
    let features = extract_features(&text);
    let categories = compose(&features);
    let score = normalize_score(&categories);
    let result = ComplexityResult {
        score,
        tier: ComplexityTier::classify(score),
        categories
    };
    (result, features)
}

/// Map features to capped category scores.
pub fn compose(features: &QueryFeatures) -> CategoryScores {
    let mut scores = CategoryScores::new();
    scores.insert_capped(Category::StructuralComplexity, structural(features));
    scores.insert_capped(Category::DialectSpecificFeatures, dialect_specific(features));
    scores.insert_capped(Category::FunctionsExpressions, functions(features));
    scores.insert_capped(Category::DataVolume, data_volume(features.length));
    scores.insert_capped(Category::ExecutionComplexity, execution(features));
    scores.insert_capped(Category::ConversionRisk, conversion_risk(features));
    scores
}

/// `min(10, 10 * total / 14)` rounded to one decimal.
pub fn normalize_score(categories: &CategoryScores) -> f64 {
    let normalized = categories.scored_total() * 10.0 / Category::scored_cap_total();
    round_one(normalized.min(10.0))
}

/// Round to one decimal place.
pub fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn structural(f: &QueryFeatures) -> f64 {
    let joins = match f.join_estimate {
        0 => 0.0,
        1..=2 => 1.0,
        3..=4 => 2.0,
        _ => 3.0
    };
    let depth = match f.subquery_depth {
        0 => 0.0,
        1 => 1.0,
        2 => 2.0,
        d => 3.0 + (d - 2).min(2) as f64
    };
    joins + depth + f.cte_count.min(2) as f64 + f.set_operator_count.min(2) as f64
}

fn dialect_specific(f: &QueryFeatures) -> f64 {
    let mut score = 0.0;
    if f.has_connect_by {
        score += 2.0;
    }
    score += f.analytic_count.min(3) as f64;
    if f.has_pivot {
        score += 2.0;
    }
    if f.has_model {
        score += 3.0;
    }
    score
}

fn functions(f: &QueryFeatures) -> f64 {
    let mut score = (f.aggregate_count as f64 * 0.5).min(2.0);
    score += (f.potential_udf_count.max(0) as f64 * 0.5).min(2.0);
    score += (f.case_count as f64 * 0.5).min(2.0);
    if f.has_regexp {
        score += 1.0;
    }
    score
}

fn data_volume(length: usize) -> f64 {
    match length {
        0..200 => 0.5,
        200..500 => 1.0,
        500..1000 => 1.5,
        _ => 2.0
    }
}

fn execution(f: &QueryFeatures) -> f64 {
    let mut score = 0.0;
    if f.join_estimate > 3 || f.subquery_depth > 1 {
        score += 1.0;
    }
    for present in [f.has_order_by, f.has_group_by, f.has_having] {
        if present {
            score += 0.5;
        }
    }
    score
}

fn conversion_risk(f: &QueryFeatures) -> f64 {
    f.conversion_weight
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(sql: &str, category: Category) -> f64 {
        score_query(sql).categories.get(category).unwrap_or_default()
    }

    #[test]
    fn test_simple_select_is_very_simple() {
        let result = score_query("SELECT id FROM t");
        assert_eq!(result.categories.get(Category::StructuralComplexity), Some(0.0));
        assert_eq!(result.categories.get(Category::DataVolume), Some(0.5));
        assert_eq!(result.score, 0.4);
        assert_eq!(result.tier, ComplexityTier::VerySimple);
    }

    #[test]
    fn test_all_scored_categories_present_in_order() {
        let result = score_query("SELECT 1 FROM DUAL");
        let keys: Vec<_> = result.categories.iter().map(|(c, _)| c).collect();
        assert_eq!(keys, Category::SCORED.to_vec());
    }

    #[test]
    fn test_join_thresholds() {
        let base = "SELECT A FROM T";
        let with_joins = |n: usize| {
            let mut sql = base.to_string();
            for i in 0..n {
                sql.push_str(&format!(" JOIN U{i} ON U{i}.ID = T.ID"));
            }
            sql
        };
        assert_eq!(category(&with_joins(0), Category::StructuralComplexity), 0.0);
        assert_eq!(category(&with_joins(2), Category::StructuralComplexity), 1.0);
        assert_eq!(category(&with_joins(4), Category::StructuralComplexity), 2.0);
        assert_eq!(category(&with_joins(5), Category::StructuralComplexity), 3.0);
    }

    #[test]
    fn test_structural_capped() {
        let sql = "WITH A AS (SELECT 1 FROM DUAL), B AS (SELECT 2 FROM DUAL) \
                   SELECT * FROM A JOIN B ON 1 = 1 UNION SELECT * FROM A \
                   UNION SELECT * FROM B";
        assert_eq!(category(sql, Category::StructuralComplexity), 3.5);
    }

    #[test]
    fn test_dialect_specific_features() {
        assert_eq!(
            category(
                "SELECT ID FROM EMP CONNECT BY PRIOR ID = MGR",
                Category::DialectSpecificFeatures
            ),
            2.0
        );
        assert_eq!(
            category(
                "SELECT ROW_NUMBER() OVER (ORDER BY A), RANK() OVER(ORDER BY B) FROM T",
                Category::DialectSpecificFeatures
            ),
            2.0
        );
        assert_eq!(
            category(
                "SELECT * FROM T PIVOT (SUM(X) FOR Y IN (1, 2)) MODEL DIMENSION BY (A)",
                Category::DialectSpecificFeatures
            ),
            3.0
        );
    }

    #[test]
    fn test_functions_expressions() {
        assert_eq!(
            category("SELECT COUNT(*), SUM(X) FROM T", Category::FunctionsExpressions),
            1.0
        );
        assert_eq!(
            category("SELECT PKG_UTIL.FORMAT_NAME(A) FROM T", Category::FunctionsExpressions),
            0.5
        );
        assert_eq!(
            category(
                "SELECT REGEXP_SUBSTR(A, '[0-9]+') FROM T",
                Category::FunctionsExpressions
            ),
            1.5
        );
    }

    #[test]
    fn test_data_volume_steps() {
        assert_eq!(data_volume(0), 0.5);
        assert_eq!(data_volume(199), 0.5);
        assert_eq!(data_volume(200), 1.0);
        assert_eq!(data_volume(499), 1.0);
        assert_eq!(data_volume(500), 1.5);
        assert_eq!(data_volume(999), 1.5);
        assert_eq!(data_volume(1000), 2.0);
    }

    #[test]
    fn test_execution_complexity() {
        let sql = "SELECT A, COUNT(*) FROM T GROUP BY A HAVING COUNT(*) > 1 ORDER BY A";
        assert_eq!(category(sql, Category::ExecutionComplexity), 1.5);
        let deep = "SELECT (SELECT (SELECT 1 FROM DUAL) FROM DUAL) FROM DUAL ORDER BY 1";
        assert_eq!(category(deep, Category::ExecutionComplexity), 1.5);
    }

    #[test]
    fn test_conversion_risk() {
        assert_eq!(
            category("SELECT ROWNUM, DECODE(A, 1, 'Y', 'N') FROM T", Category::ConversionRisk),
            1.5
        );
        let heavy = "SELECT ROWID, ROWNUM, LEVEL FROM T START WITH A IS NULL \
                     CONNECT BY PRIOR ID = A";
        assert_eq!(category(heavy, Category::ConversionRisk), 2.0);
    }

    #[test]
    fn test_joins_and_correlated_subquery() {
        let sql = "SELECT E.ID, (SELECT MAX(S.AMOUNT) FROM SALARIES S WHERE S.EMP_ID = E.ID) \
                   FROM EMPLOYEES E JOIN DEPARTMENTS D ON E.DEPT_ID = D.ID \
                   JOIN LOCATIONS L ON D.LOC_ID = L.ID GROUP BY E.ID ORDER BY E.ID";
        let result = score_query(sql);
        assert!(result.categories.get(Category::StructuralComplexity).unwrap() >= 2.0);
        assert!(result.categories.get(Category::ExecutionComplexity).unwrap() >= 1.0);
        assert!(result.score > 1.0);
    }

    #[test]
    fn test_score_is_idempotent() {
        let sql = "SELECT A FROM T JOIN U ON T.ID = U.ID WHERE ROWNUM < 10";
        assert_eq!(score_query(sql), score_query(sql));
    }

    #[test]
    fn test_empty_text_scores_volume_only() {
        let result = score_query("   ");
        assert_eq!(result.categories.scored_total(), 0.5);
        assert_eq!(result.score, 0.4);
    }

    #[test]
    fn test_round_one() {
        assert_eq!(round_one(2.35714), 2.4);
        assert_eq!(round_one(10.0), 10.0);
        assert_eq!(round_one(0.04), 0.0);
    }

    #[test]
    fn test_score_with_features_matches_score() {
        let sql = "SELECT NVL2(A, 1, 0) FROM T, U";
        let (result, features) = score_query_with_features(sql);
        assert_eq!(result, score_query(sql));
        assert_eq!(features.join_estimate, 1);
        assert_eq!(features.risky_functions, vec!["NVL2"]);
    }
}
