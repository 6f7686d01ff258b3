//! Types for MyBatis dynamic SQL templates.

use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;

/// Buffer of trimmed text fragments collected during traversal.
pub type Fragments = SmallVec<[String; 16]>;

/// A MyBatis dynamic SQL construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructKind {
    If,
    Choose,
    When,
    Otherwise,
    Foreach,
    Where,
    Set,
    Trim,
    Bind
}

impl ConstructKind {
    pub const ALL: [ConstructKind; 9] = [
        Self::If,
        Self::Choose,
        Self::When,
        Self::Otherwise,
        Self::Foreach,
        Self::Where,
        Self::Set,
        Self::Trim,
        Self::Bind
    ];

    /// Match an element's local name. Matching is case-sensitive.
    pub fn from_tag(name: &str) -> Option<Self> {
        match name {
            "if" => Some(Self::If),
            "choose" => Some(Self::Choose),
            "when" => Some(Self::When),
            "otherwise" => Some(Self::Otherwise),
            "foreach" => Some(Self::Foreach),
            "where" => Some(Self::Where),
            "set" => Some(Self::Set),
            "trim" => Some(Self::Trim),
            "bind" => Some(Self::Bind),
            _ => None
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Choose => "choose",
            Self::When => "when",
            Self::Otherwise => "otherwise",
            Self::Foreach => "foreach",
            Self::Where => "where",
            Self::Set => "set",
            Self::Trim => "trim",
            Self::Bind => "bind"
        }
    }

    /// Guarded branches: `if`, and the `when`/`otherwise` arms of a choice.
    ///
    /// Choice arms count as conditional on purpose, so `foreach > choose >
    /// when` nests two levels deep.
    pub fn is_conditional(self) -> bool {
        matches!(self, Self::If | Self::When | Self::Otherwise)
    }

    pub fn is_loop(self) -> bool {
        matches!(self, Self::Foreach)
    }

    /// Whether content below this construct may be left out of the output.
    pub fn guards_content(self) -> bool {
        self.is_conditional() || self.is_loop()
    }

    /// Nesting added when descending into this construct.
    pub fn depth_increment(self) -> usize {
        usize::from(self.guards_content())
    }
}

impl std::fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Occurrence counts per construct kind plus the deepest nesting reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagTally {
    pub counts:    IndexMap<ConstructKind, usize>,
    pub max_depth: usize
}

impl Default for TagTally {
    fn default() -> Self {
        Self {
            counts:    ConstructKind::ALL.iter().map(|k| (*k, 0)).collect(),
            max_depth: 0
        }
    }
}

impl TagTally {
    /// Record one element visited at `depth`.
    pub fn observe(&mut self, kind: Option<ConstructKind>, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
        if let Some(kind) = kind {
            *self.counts.entry(kind).or_insert(0) += 1;
        }
    }

    pub fn count(&self, kind: ConstructKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Base and worst-case text derived from a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateReduction {
    /// Static fragments only
    pub base_text:          String,
    /// Static fragments plus every conditional and loop body
    pub worst_case_text:    String,
    /// Bounded contribution in `[0, 3]`
    pub dynamic_complexity: f64,
    pub tally:              TagTally
}
