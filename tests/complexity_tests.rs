// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_migration_analyzer::complexity::{
    Category, ComplexityTier, compose, extract_features, normalize, normalize_score, score_query,
    score_query_with_features
};

fn category(sql: &str, category: Category) -> f64 {
    score_query(sql).categories.get(category).unwrap()
}

#[test]
fn test_simple_select() {
    let result = score_query("SELECT id FROM t");
    assert_eq!(result.categories.get(Category::StructuralComplexity), Some(0.0));
    assert_eq!(result.tier, ComplexityTier::VerySimple);
    assert_eq!(result.score, 0.4);
}

#[test]
fn test_empty_text_scores_volume_only() {
    let result = score_query("");
    assert_eq!(result.score, 0.4);
    assert_eq!(result.categories.get(Category::DataVolume), Some(0.5));
    assert_eq!(result.categories.len(), 6);
}

#[test]
fn test_joins_subquery_and_grouping() {
    let sql = "SELECT d.name, COUNT(*) FROM emp e \
               JOIN dept d ON e.dept_id = d.id \
               JOIN loc l ON d.loc_id = l.id \
               WHERE e.salary > (SELECT AVG(salary) FROM emp x WHERE x.dept_id = e.dept_id) \
               GROUP BY d.name ORDER BY d.name";
    assert!(category(sql, Category::StructuralComplexity) >= 2.0);
    assert!(category(sql, Category::ExecutionComplexity) >= 1.0);
}

#[test]
fn test_hierarchical_query_is_risky() {
    let sql = "SELECT LEVEL, SYS_CONNECT_BY_PATH(name, '/') FROM org \
               START WITH parent_id IS NULL CONNECT BY PRIOR id = parent_id";
    let result = score_query(sql);
    assert_eq!(result.categories.get(Category::ConversionRisk), Some(2.0));
    assert_eq!(result.categories.get(Category::DialectSpecificFeatures), Some(2.0));
}

#[test]
fn test_score_bounds_and_caps() {
    let sql = "WITH a AS (SELECT 1 FROM DUAL), b AS (SELECT 2 FROM DUAL) \
               SELECT ROWNUM, ROWID, DECODE(x, 1, 2), NVL2(a, b, c), LISTAGG(n, ',') \
               WITHIN GROUP (ORDER BY n), REGEXP_LIKE(n, 'x'), SYS_CONTEXT('a', 'b'), \
               EXTRACT(YEAR FROM d), RANK() OVER (ORDER BY n), ROW_NUMBER() OVER (ORDER BY n), \
               SUM(v) OVER (PARTITION BY n), MY_FUNC(a), OTHER_FUNC(b) \
               FROM t PIVOT (SUM(v) FOR k IN (1, 2)) MODEL DIMENSION BY (k) MEASURES (v) RULES () \
               CONNECT BY PRIOR a = b START WITH a IS NULL \
               UNION SELECT 1 FROM DUAL MINUS SELECT 2 FROM DUAL INTERSECT SELECT 3 FROM DUAL \
               GROUP BY n HAVING COUNT(*) > 1 ORDER BY n";
    let result = score_query(sql);
    assert!(result.score <= 10.0);
    for (category, value) in result.categories.iter() {
        assert!(value >= 0.0 && value <= category.cap(), "{} = {}", category, value);
    }
    assert_eq!(result.categories.get(Category::DialectSpecificFeatures), Some(3.0));
    assert_eq!(result.categories.get(Category::ConversionRisk), Some(2.0));
}

#[test]
fn test_idempotent() {
    let sql = "SELECT a FROM t JOIN u ON t.id = u.id WHERE ROWNUM < 10";
    assert_eq!(score_query(sql), score_query(sql));
}

#[test]
fn test_monotone_in_join_count() {
    let mut previous = 0.0;
    for joins in 0..7 {
        let mut sql = String::from("SELECT a FROM t0");
        for i in 1..=joins {
            sql.push_str(&format!(" JOIN t{} ON t{}.id = t0.id", i, i));
        }
        let structural = category(&sql, Category::StructuralComplexity);
        assert!(structural >= previous);
        previous = structural;
    }
    assert_eq!(previous, 3.0);
}

#[test]
fn test_monotone_in_subquery_depth() {
    let mut previous = 0.0;
    for depth in 0..6 {
        let mut inner = String::from("1");
        for _ in 0..depth {
            inner = format!("(SELECT {} FROM dual)", inner);
        }
        let sql = format!("SELECT {} FROM dual", inner);
        assert_eq!(extract_features(&normalize(&sql)).subquery_depth, depth);
        let score = score_query(&sql).score;
        assert!(score >= previous, "depth {}: {} < {}", depth, score, previous);
        previous = score;
    }
}

#[test]
fn test_monotone_in_analytic_count() {
    let mut previous_score = 0.0;
    let mut previous_dialect = 0.0;
    for windows in 0..6 {
        let mut sql = String::from("SELECT a");
        for i in 0..windows {
            sql.push_str(&format!(", RANK() OVER (ORDER BY c{})", i));
        }
        sql.push_str(" FROM t");
        let result = score_query(&sql);
        let dialect = result
            .categories
            .get(Category::DialectSpecificFeatures)
            .unwrap_or_default();
        assert!(dialect >= previous_dialect);
        assert!(result.score >= previous_score);
        previous_dialect = dialect;
        previous_score = result.score;
    }
    assert_eq!(previous_dialect, 3.0);
}

#[test]
fn test_dialect_keywords_never_lower_score() {
    let base = "SELECT a FROM t";
    let base_result = score_query(base);
    for sql in [
        "SELECT a FROM t CONNECT BY PRIOR a = b",
        "SELECT a FROM t PIVOT (SUM(x) FOR y IN (1, 2))",
        "SELECT a FROM t MODEL DIMENSION BY (a) MEASURES (b) RULES (b[1] = 0)",
    ] {
        let result = score_query(sql);
        assert!(result.score >= base_result.score, "{}", sql);
        assert!(
            result.categories.get(Category::DialectSpecificFeatures)
                > base_result.categories.get(Category::DialectSpecificFeatures),
            "{}",
            sql
        );
    }
}

#[test]
fn test_comma_joins_counted() {
    let features = extract_features(&normalize("select a from t1, t2, t3 where t1.id = t2.id"));
    assert_eq!(features.join_estimate, 2);
}

#[test]
fn test_with_features_matches_score() {
    let sql = "SELECT DECODE(a, 1, 'x') FROM t WHERE ROWNUM = 1";
    let (result, features) = score_query_with_features(sql);
    assert_eq!(result, score_query(sql));
    assert_eq!(features.risky_syntax, vec!["ROWNUM"]);
    assert_eq!(features.risky_functions, vec!["DECODE"]);
    assert_eq!(normalize_score(&compose(&features)), result.score);
}

#[test]
fn test_tier_thresholds() {
    assert_eq!(ComplexityTier::classify(1.0), ComplexityTier::VerySimple);
    assert_eq!(ComplexityTier::classify(1.1), ComplexityTier::Simple);
    assert_eq!(ComplexityTier::classify(5.0), ComplexityTier::Moderate);
    assert_eq!(ComplexityTier::classify(7.0), ComplexityTier::Complex);
    assert_eq!(ComplexityTier::classify(9.0), ComplexityTier::VeryComplex);
    assert_eq!(ComplexityTier::classify(9.1), ComplexityTier::ExtremelyComplex);
    assert_eq!(ComplexityTier::ExtremelyComplex.label(), "extremely complex");
}
