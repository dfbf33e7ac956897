//! Run logs: one pretty-printed JSON artifact per completed run.
//!
//! Files are named `{timestamp}_{mode}.json` with a local-time timestamp of
//! second granularity. Two runs of the same mode within one second share a
//! name and the later write replaces the earlier one.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::core::types::{EvaluationMetrics, Message, RunMetadata, RunMode};

/// `YYYYMMDD_HHMMSS`
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Metadata as persisted: the run metadata merged with its evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedMetadata {
    pub mode: RunMode,
    pub model: String,
    pub rounds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_chars: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_steps: Option<bool>,
}

impl LoggedMetadata {
    pub fn new(metadata: &RunMetadata, evaluation: Option<&EvaluationMetrics>) -> Self {
        Self {
            mode: metadata.mode,
            model: metadata.model.clone(),
            rounds: evaluation.map_or(metadata.rounds, |e| e.rounds),
            output_chars: evaluation.map(|e| e.output_chars),
            has_steps: evaluation.map(|e| e.has_steps),
        }
    }
}

/// On-disk shape of a run log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLog {
    pub timestamp: String,
    pub mode: RunMode,
    pub task: String,
    pub agent_messages: Vec<Message>,
    pub final_answer: String,
    pub metadata: LoggedMetadata,
}

/// Everything needed to write a run log, borrowed from the caller.
pub struct RunLogRequest<'a> {
    pub task: &'a str,
    pub mode: RunMode,
    pub messages: &'a [Message],
    pub final_answer: &'a str,
    pub metadata: LoggedMetadata,
}

/// Path of the artifact for `mode` written at `timestamp`.
pub fn run_log_path(out_dir: &Path, timestamp: &str, mode: RunMode) -> PathBuf {
    out_dir.join(format!("{timestamp}_{mode}.json"))
}

/// Write a run log stamped with the current local time.
pub fn save_run_log(out_dir: &Path, request: &RunLogRequest<'_>) -> Result<PathBuf> {
    save_run_log_at(out_dir, request, Local::now().naive_local())
}

/// Write a run log stamped with `at`. Creates `out_dir` if needed.
#[instrument(skip_all, fields(out_dir = %out_dir.display(), mode = %request.mode))]
pub fn save_run_log_at(
    out_dir: &Path,
    request: &RunLogRequest<'_>,
    at: NaiveDateTime,
) -> Result<PathBuf> {
    let timestamp = at.format(TIMESTAMP_FORMAT).to_string();
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create run log dir {}", out_dir.display()))?;

    let log = RunLog {
        timestamp: timestamp.clone(),
        mode: request.mode,
        task: request.task.to_string(),
        agent_messages: request.messages.to_vec(),
        final_answer: request.final_answer.to_string(),
        metadata: request.metadata.clone(),
    };

    let path = run_log_path(out_dir, &timestamp, request.mode);
    write_json(&path, &log)?;
    info!(path = %path.display(), messages = log.agent_messages.len(), "saved run log");
    Ok(path)
}

/// Read a run log back from disk.
pub fn load_run_log(path: &Path) -> Result<RunLog> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read run log {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse run log {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buf = serde_json::to_string_pretty(value).context("serialize run log")?;
    buf.push('\n');
    fs::write(path, buf).with_context(|| format!("write {}", path.display()))
}
