//! Human-readable CLI output.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::core::types::{EvaluationMetrics, RunMode};

/// Block printed for every finished run.
pub fn render_run(
    mode: RunMode,
    final_answer: &str,
    metrics: &EvaluationMetrics,
    log_path: &Path,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== {} FINAL ANSWER ===", mode.as_str().to_uppercase());
    let _ = writeln!(out, "{final_answer}\n");
    let _ = writeln!(out, "Evaluation: {}", render_metrics(metrics));
    let _ = writeln!(out, "Log saved: {}", log_path.display());
    out
}

pub fn render_metrics(metrics: &EvaluationMetrics) -> String {
    format!(
        "rounds={}, output_chars={}, has_steps={}",
        metrics.rounds, metrics.output_chars, metrics.has_steps
    )
}

/// Side-by-side summary for `both` mode, one line per mode.
pub fn render_comparison(metrics: &BTreeMap<RunMode, EvaluationMetrics>) -> String {
    let mut out = String::from("=== COMPARISON SUMMARY ===\n");
    for (mode, m) in metrics {
        let _ = writeln!(
            out,
            "{}: chars={}, rounds={}, has_steps={}",
            title_case(mode.as_str()),
            m.output_chars,
            m.rounds,
            m.has_steps
        );
    }
    out
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
