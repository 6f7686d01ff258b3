//! Static pattern tables for feature extraction.
//!
//! All patterns run against trimmed, upper-cased query text, so they are
//! written in upper case without the `(?i)` flag.

use std::sync::LazyLock;

use regex::Regex;

/// A labelled pattern carrying the score it adds when present.
#[derive(Debug)]
pub struct WeightedPattern {
    pub label:  &'static str,
    pub regex:  Regex,
    pub weight: f64
}

impl WeightedPattern {
    pub(crate) fn new(label: &'static str, pattern: &str, weight: f64) -> Self {
        Self {
            label,
            regex: Regex::new(pattern).expect("valid regex"),
            weight
        }
    }
}

pub static JOIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bJOIN\b").expect("valid regex"));

/// First FROM clause up to the next clause keyword or end of text.
pub static FROM_CLAUSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)FROM\s+(.*?)(?:WHERE|GROUP BY|ORDER BY|HAVING|$)").expect("valid regex")
});

pub static CTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bWITH\b").expect("valid regex"));

pub static SET_OPERATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(UNION|INTERSECT|MINUS)\b").expect("valid regex"));

pub static CONNECT_BY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bCONNECT\s+BY\b").expect("valid regex"));

pub static ANALYTIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bOVER\s*\(").expect("valid regex"));

pub static PIVOT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(PIVOT|UNPIVOT)\b").expect("valid regex"));

pub static MODEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bMODEL\b").expect("valid regex"));

pub static AGGREGATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(COUNT|SUM|AVG|MIN|MAX|STDDEV|VARIANCE)\s*\(").expect("valid regex")
});

/// Anything that looks like a call: an identifier followed by `(`.
pub static CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z0-9_]+\s*\(").expect("valid regex"));

/// Calls to well-known built-ins, subtracted from [`CALL_REGEX`] matches.
pub static BUILTIN_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(COUNT|SUM|AVG|MIN|MAX|SUBSTR|INSTR|TO_DATE|TO_CHAR|NVL|DECODE|CASE|CAST|CONVERT)\s*\("
    )
    .expect("valid regex")
});

pub static CASE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bCASE\b").expect("valid regex"));

pub static REGEXP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bREGEXP_").expect("valid regex"));

/// Source-dialect syntax with no direct target equivalent.
pub static CONVERSION_SYNTAX: LazyLock<Vec<WeightedPattern>> = LazyLock::new(|| {
    vec![
        WeightedPattern::new("CONNECT BY", r"\bCONNECT\s+BY\b", 1.0),
        WeightedPattern::new("START WITH", r"\bSTART\s+WITH\b", 1.0),
        WeightedPattern::new("PRIOR", r"\bPRIOR\b", 1.0),
        WeightedPattern::new("MODEL", r"\bMODEL\b", 1.0),
        WeightedPattern::new("PIVOT/UNPIVOT", r"\b(PIVOT|UNPIVOT)\b", 1.0),
        WeightedPattern::new("FLASHBACK", r"\bFLASHBACK\b", 1.0),
        WeightedPattern::new("SYS_CONNECT_BY_PATH", r"\bSYS_CONNECT_BY_PATH\b", 1.0),
        WeightedPattern::new("ROWID", r"\bROWID\b", 1.0),
        WeightedPattern::new("ROWNUM", r"\bROWNUM\b", 1.0),
    ]
});

/// Source-dialect functions that need rewriting.
pub static CONVERSION_FUNCTIONS: LazyLock<Vec<WeightedPattern>> = LazyLock::new(|| {
    vec![
        WeightedPattern::new("DECODE", r"\bDECODE\s*\(", 0.5),
        WeightedPattern::new("NVL2", r"\bNVL2\s*\(", 0.5),
        WeightedPattern::new("LISTAGG", r"\bLISTAGG\s*\(", 0.5),
        WeightedPattern::new("REGEXP_*", r"\bREGEXP_", 0.5),
        WeightedPattern::new("SYS_CONTEXT", r"\bSYS_CONTEXT\s*\(", 0.5),
        WeightedPattern::new("EXTRACT", r"\bEXTRACT\s*\(", 0.5),
    ]
});
