//! Shared deterministic types for orchestration runs.
//!
//! These types define the stable contracts between the revision loop, the
//! evaluator and the run recorder. They carry no I/O and serialize to the
//! exact field names written into run logs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which strategy produced a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// One call to the single-agent baseline.
    Single,
    /// Planner -> Executor -> Critic revision loop.
    Multi,
}

impl RunMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RunMode::Single => "single",
            RunMode::Multi => "multi",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speaker role of a transcript entry. Every agent reply is an assistant turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    Assistant,
}

/// One entry of a run transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub agent_name: String,
    pub content: String,
}

impl Message {
    pub fn assistant(agent_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            agent_name: agent_name.into(),
            content: content.into(),
        }
    }
}

/// Metadata recorded alongside every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub mode: RunMode,
    /// Deployment (or model) name the gateway was configured with.
    pub model: String,
    /// Completed executor cycles; always 1 for single mode.
    pub rounds: u32,
}

/// Outcome of one run: full transcript, final answer and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub agent_messages: Vec<Message>,
    pub final_answer: String,
    pub metadata: RunMetadata,
}

/// Shallow descriptive metrics derived from a final answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub rounds: u32,
    pub output_chars: usize,
    pub has_steps: bool,
}
