//! Raw feature extraction over normalized query text.

use serde::Serialize;

use super::patterns::{
    AGGREGATE_REGEX, ANALYTIC_REGEX, BUILTIN_CALL_REGEX, CALL_REGEX, CASE_REGEX,
    CONNECT_BY_REGEX, CONVERSION_FUNCTIONS, CONVERSION_SYNTAX, CTE_REGEX, FROM_CLAUSE_REGEX,
    JOIN_REGEX, MODEL_REGEX, PIVOT_REGEX, REGEXP_REGEX, SET_OPERATOR_REGEX, WeightedPattern
};

/// Number of characters inspected before an opening parenthesis.
const SUBQUERY_LOOKBEHIND: usize = 10;

/// Counts and flags derived from one query text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryFeatures {
    pub join_estimate:       usize,
    pub subquery_depth:      usize,
    pub cte_count:           usize,
    pub set_operator_count:  usize,
    pub has_connect_by:      bool,
    pub analytic_count:      usize,
    pub has_pivot:           bool,
    pub has_model:           bool,
    pub aggregate_count:     usize,
    /// Call-like tokens minus built-in calls; may be negative
    pub potential_udf_count: i64,
    pub case_count:          usize,
    pub has_regexp:          bool,
    /// Length in characters
    pub length:              usize,
    pub has_order_by:        bool,
    pub has_group_by:        bool,
    pub has_having:          bool,
    /// Labels of matched conversion-risk syntax patterns
    pub risky_syntax:        Vec<&'static str>,
    /// Labels of matched conversion-risk function patterns
    pub risky_functions:     Vec<&'static str>,
    /// Summed weight of every matched conversion-risk pattern
    pub conversion_weight:   f64
}

/// Trim and upper-case query text before analysis.
pub fn normalize(query: &str) -> String {
    query.trim().to_uppercase()
}

/// Extract features from text that is already normalized.
pub fn extract_features(text: &str) -> QueryFeatures {
    let potential_udf_count = CALL_REGEX.find_iter(text).count() as i64
        - BUILTIN_CALL_REGEX.find_iter(text).count() as i64;
    let (risky_syntax, syntax_weight) = match_weighted(&CONVERSION_SYNTAX, text);
    let (risky_functions, function_weight) = match_weighted(&CONVERSION_FUNCTIONS, text);
    QueryFeatures {
        join_estimate: estimate_joins(text),
        subquery_depth: subquery_depth(text),
        cte_count: CTE_REGEX.find_iter(text).count(),
        set_operator_count: SET_OPERATOR_REGEX.find_iter(text).count(),
        has_connect_by: CONNECT_BY_REGEX.is_match(text),
        analytic_count: ANALYTIC_REGEX.find_iter(text).count(),
        has_pivot: PIVOT_REGEX.is_match(text),
        has_model: MODEL_REGEX.is_match(text),
        aggregate_count: AGGREGATE_REGEX.find_iter(text).count(),
        potential_udf_count,
        case_count: CASE_REGEX.find_iter(text).count(),
        has_regexp: REGEXP_REGEX.is_match(text),
        length: text.chars().count(),
        has_order_by: text.contains("ORDER BY"),
        has_group_by: text.contains("GROUP BY"),
        has_having: text.contains("HAVING"),
        risky_syntax,
        risky_functions,
        conversion_weight: syntax_weight + function_weight
    }
}

/// Labels and summed weight of the patterns present in `text`.
fn match_weighted(table: &[WeightedPattern], text: &str) -> (Vec<&'static str>, f64) {
    table
        .iter()
        .filter(|p| p.regex.is_match(text))
        .fold((Vec::new(), 0.0), |(mut labels, weight), p| {
            labels.push(p.label);
            (labels, weight + p.weight)
        })
}

/// Explicit JOINs plus implicit comma joins in the first FROM clause.
pub fn estimate_joins(text: &str) -> usize {
    let mut joins = JOIN_REGEX.find_iter(text).count();
    if text.contains(',')
        && text.contains("FROM")
        && let Some(tables) = FROM_CLAUSE_REGEX.captures(text).and_then(|c| c.get(1))
    {
        let table_count = tables.as_str().split(',').count();
        joins += table_count.saturating_sub(1);
    }
    joins
}

/// Maximum subquery nesting depth.
///
/// A parenthesis opens a subquery level when `SELECT` appears within the
/// ten characters before it. Only one open subquery is tracked at a time:
/// the first closing parenthesis after a subquery opened ends that level,
/// whatever parenthesis it actually matches.
pub fn subquery_depth(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    let mut open_parens = 0usize;
    let mut subquery_open = false;
    for (i, &ch) in chars.iter().enumerate() {
        match ch {
            '(' => {
                open_parens += 1;
                let window: String = chars[i.saturating_sub(SUBQUERY_LOOKBEHIND)..i]
                    .iter()
                    .collect();
                if window.contains("SELECT") {
                    subquery_open = true;
                    depth += 1;
                    max_depth = max_depth.max(depth);
                }
            }
            ')' if open_parens > 0 => {
                open_parens -= 1;
                if subquery_open {
                    depth = depth.saturating_sub(1);
                    subquery_open = false;
                }
            }
            _ => {}
        }
    }
    max_depth
}
