//! Shallow descriptive metrics for a final answer.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::types::EvaluationMetrics;

/// Numbered step (`1. `) anywhere, or a `- ` / `* ` bullet after a line break.
static STEPS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\. |\n- |\n\* )").expect("steps regex should be valid"));

/// Compute metrics for `final_answer` produced after `rounds` executor cycles.
///
/// `output_chars` counts characters, not bytes.
pub fn evaluate(final_answer: &str, rounds: u32) -> EvaluationMetrics {
    EvaluationMetrics {
        rounds,
        output_chars: final_answer.chars().count(),
        has_steps: STEPS_RE.is_match(final_answer),
    }
}
