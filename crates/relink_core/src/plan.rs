//! Mutation planning: decides how a description must change, if at all.

use crate::links::{contains_target_link, detect_legacy_link, MatchSpan, PREPEND_LABEL};

/// The one mutation to perform on a description, consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationPlan {
    /// The target link is already present.
    NoOp,
    /// Overwrite the legacy link at `span` with `new_text`.
    Replace { span: MatchSpan, new_text: String },
    /// Insert `new_text` before the existing content.
    Prepend { new_text: String },
}

/// Plans the repair for `current_text` against the record's target link.
///
/// Exactly three signals are inspected, in order: target already present,
/// legacy link present, neither. Replacement keeps descriptions from
/// accumulating stale links; prepending puts the link where truncated
/// previews still show it. Re-planning over an applied plan's output is
/// always `NoOp`.
pub fn plan_mutation(current_text: &str, target_link: &str) -> MutationPlan {
    if contains_target_link(current_text, target_link) {
        return MutationPlan::NoOp;
    }
    if let Some(span) = detect_legacy_link(current_text) {
        return MutationPlan::Replace {
            span,
            new_text: target_link.to_string(),
        };
    }
    MutationPlan::Prepend {
        new_text: format!("{PREPEND_LABEL}{target_link}\n\n"),
    }
}

impl MutationPlan {
    /// Applies the plan to `text`, purely at the string level.
    ///
    /// The executor performs the equivalent edit on the remote surface;
    /// this form backs the planner's idempotence property and the tests.
    pub fn apply(&self, text: &str) -> String {
        match self {
            MutationPlan::NoOp => text.to_string(),
            MutationPlan::Replace { span, new_text } => {
                let mut out = String::with_capacity(text.len() + new_text.len());
                out.push_str(&text[..span.start]);
                out.push_str(new_text);
                out.push_str(&text[span.end..]);
                out
            }
            MutationPlan::Prepend { new_text } => format!("{new_text}{text}"),
        }
    }
}
