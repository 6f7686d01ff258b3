//! MyBatis dynamic SQL reduction.
//!
//! A template such as
//!
//! ```xml
//! <select id="findUsers">
//!     SELECT id FROM users
//!     <where>
//!         <if test="name != null">AND name = #{name}</if>
//!     </where>
//! </select>
//! ```
//!
//! is folded into two SQL texts before scoring:
//!
//! - **base** - only fragments that are always emitted
//! - **worst case** - every fragment, as if all conditions held
//!
//! A separate dynamic-complexity contribution in `[0, 3]` is computed from
//! the template structure itself (construct counts, nesting depth, loops and
//! choices).
//!
//! Documents that are not well-formed XML reduce to empty texts and a zero
//! contribution. The parse error is logged, never returned.

mod types;

use roxmltree::{Document, Node, ParsingOptions};
use tracing::{debug, warn};
pub use types::{ConstructKind, Fragments, TagTally, TemplateReduction};

use crate::error::describe_template_error;

/// Upper bound of the dynamic contribution.
pub const MAX_DYNAMIC_COMPLEXITY: f64 = 3.0;

/// Reduce a template document into base and worst-case SQL.
pub fn reduce_template(xml: &str) -> TemplateReduction {
    let options = {
        let mut options = ParsingOptions::default();
        // Mapper files usually carry a DOCTYPE pointing at the MyBatis DTD
        options.allow_dtd = true;
        options
    };
    let doc = match Document::parse_with_options(xml, options) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("{}", describe_template_error(&e));
            return TemplateReduction::default();
        }
    };
    let mut acc = Accumulator::default();
    acc.visit(doc.root_element(), 0, false);
    let dynamic_complexity = dynamic_contribution(&acc.tally);
    debug!(
        constructs = acc.tally.total(),
        max_depth = acc.tally.max_depth,
        dynamic_complexity,
        "reduced template"
    );
    TemplateReduction {
        base_text: acc.base.join(" "),
        worst_case_text: acc.worst_case.join(" "),
        dynamic_complexity,
        tally: acc.tally
    }
}

/// Dynamic-complexity contribution of a tally, clamped to `[0, 3]`.
///
/// Depth 0 falls into the top depth band, so a template with no dynamic
/// construct still contributes 2.5.
pub fn dynamic_contribution(tally: &TagTally) -> f64 {
    let mut score = match tally.total() {
        0..=2 => 0.5,
        3..=5 => 1.0,
        6..=10 => 1.5,
        _ => 2.0
    };
    score += match tally.max_depth {
        1 => 0.3,
        2 => 0.7,
        3 => 1.2,
        _ => 2.0
    };
    let loops = tally.count(ConstructKind::Foreach);
    if loops > 0 {
        score += (loops as f64 * 0.3).min(1.0);
    }
    let choices = tally.count(ConstructKind::Choose);
    if choices > 0 {
        score += (choices as f64 * 0.2).min(0.8);
    }
    score.clamp(0.0, MAX_DYNAMIC_COMPLEXITY)
}

/// Text buffers and tally threaded through the traversal.
#[derive(Debug, Default)]
struct Accumulator {
    base:       Fragments,
    worst_case: Fragments,
    tally:      TagTally
}

impl Accumulator {
    /// Visit an element at `depth`.
    ///
    /// `guarded` is set inside an `if`, `when`, `otherwise` or `foreach`;
    /// no text below such an element reaches the base buffer. The leading
    /// text of any dynamic construct is worst-case only. Text following a
    /// child element goes to both buffers unless guarded.
    fn visit(&mut self, node: Node<'_, '_>, depth: usize, guarded: bool) {
        let kind = ConstructKind::from_tag(node.tag_name().name());
        self.tally.observe(kind, depth);
        let leading_guarded = guarded || kind.is_some();
        let mut past_element = false;
        for child in node.children() {
            if child.is_text() {
                if let Some(text) = child.text() {
                    self.push(text, if past_element { guarded } else { leading_guarded });
                }
            } else if child.is_element() {
                past_element = true;
                match ConstructKind::from_tag(child.tag_name().name()) {
                    Some(kind) => self.visit(
                        child,
                        depth + kind.depth_increment(),
                        guarded || kind.guards_content()
                    ),
                    None => self.visit(child, depth, guarded)
                }
            }
        }
    }

    fn push(&mut self, text: &str, guarded: bool) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if !guarded {
            self.base.push(text.to_string());
        }
        self.worst_case.push(text.to_string());
    }
}
