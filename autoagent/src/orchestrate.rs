//! Run modes: single-agent baseline, multi-agent revision loop, or both.
//!
//! Runs are strictly sequential. In `both` mode the baseline finishes before
//! the revision loop issues its first call.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::ValueEnum;
use tracing::{info, instrument};

use crate::agents::{Agent, roles};
use crate::core::types::{RunMetadata, RunMode, RunResult};
use crate::io::gateway::Gateway;
use crate::io::prompt::PromptEngine;
use crate::revision::run_revision_loop;

/// Which strategies to run for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunSelection {
    Single,
    Multi,
    Both,
}

impl RunSelection {
    /// Modes to run, in execution order.
    pub fn modes(self) -> &'static [RunMode] {
        match self {
            RunSelection::Single => &[RunMode::Single],
            RunSelection::Multi => &[RunMode::Multi],
            RunSelection::Both => &[RunMode::Single, RunMode::Multi],
        }
    }
}

/// Drives runs against one gateway and records `model` in their metadata.
pub struct Orchestrator<'g, G: Gateway> {
    gateway: &'g G,
    model: String,
    prompts: PromptEngine,
}

impl<'g, G: Gateway> Orchestrator<'g, G> {
    pub fn new(gateway: &'g G, model: impl Into<String>) -> Self {
        Self {
            gateway,
            model: model.into(),
            prompts: PromptEngine::new(),
        }
    }

    /// Single-agent baseline: one call, rounds fixed at 1.
    #[instrument(skip_all)]
    pub fn run_single(&self, task: &str) -> Result<RunResult> {
        let agent = Agent::new(roles::SINGLE_AGENT, self.gateway);
        let answer = agent.generate_reply(task)?;
        info!(answer_len = answer.len(), "single run finished");
        Ok(RunResult {
            agent_messages: vec![agent.message(answer.as_str())],
            final_answer: answer,
            metadata: self.metadata(RunMode::Single, 1),
        })
    }

    /// Planner -> Executor -> Critic loop with at most `max_rounds` reviews.
    #[instrument(skip_all, fields(max_rounds = max_rounds))]
    pub fn run_multi(&self, task: &str, max_rounds: u32) -> Result<RunResult> {
        let outcome = run_revision_loop(self.gateway, &self.prompts, task, max_rounds)?;
        Ok(RunResult {
            agent_messages: outcome.transcript,
            final_answer: outcome.final_answer,
            metadata: self.metadata(RunMode::Multi, outcome.rounds),
        })
    }

    /// Baseline then revision loop on the same task, keyed by mode.
    pub fn run_both(&self, task: &str, max_rounds: u32) -> Result<BTreeMap<RunMode, RunResult>> {
        self.run(RunSelection::Both, task, max_rounds)
    }

    /// Run every mode in `selection` in order. Any gateway error aborts the
    /// whole invocation and discards results already produced.
    pub fn run(
        &self,
        selection: RunSelection,
        task: &str,
        max_rounds: u32,
    ) -> Result<BTreeMap<RunMode, RunResult>> {
        let mut results = BTreeMap::new();
        for &mode in selection.modes() {
            let result = match mode {
                RunMode::Single => self.run_single(task)?,
                RunMode::Multi => self.run_multi(task, max_rounds)?,
            };
            results.insert(mode, result);
        }
        Ok(results)
    }

    fn metadata(&self, mode: RunMode, rounds: u32) -> RunMetadata {
        RunMetadata {
            mode,
            model: self.model.clone(),
            rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MessageRole;
    use crate::test_support::ScriptedGateway;

    #[test]
    fn run_single_returns_one_message_and_one_round() {
        let gateway = ScriptedGateway::new(["Hello there friend"]);
        let orchestrator = Orchestrator::new(&gateway, "gpt-4o-deploy");

        let result = orchestrator.run_single("Say hello in 3 words.").expect("run");

        assert_eq!(result.final_answer, "Hello there friend");
        assert_eq!(result.metadata.rounds, 1);
        assert_eq!(result.metadata.mode, RunMode::Single);
        assert_eq!(result.metadata.model, "gpt-4o-deploy");
        assert_eq!(result.agent_messages.len(), 1);
        assert_eq!(result.agent_messages[0].agent_name, "SingleAgent");
        assert_eq!(result.agent_messages[0].role, MessageRole::Assistant);
        let calls = gateway.calls();
        assert_eq!(calls[0].system, roles::SINGLE_AGENT.system_message);
        assert_eq!(calls[0].prompt, "Say hello in 3 words.");
    }

    #[test]
    fn run_multi_maps_loop_outcome() {
        let gateway = ScriptedGateway::new(["plan", "draft", "APPROVED"]);
        let orchestrator = Orchestrator::new(&gateway, "m");

        let result = orchestrator.run_multi("task", 2).expect("run");

        assert_eq!(result.metadata.mode, RunMode::Multi);
        assert_eq!(result.metadata.rounds, 1);
        assert_eq!(result.final_answer, "draft");
        assert_eq!(result.agent_messages.len(), 3);
    }

    #[test]
    fn run_both_returns_exactly_single_and_multi() {
        let gateway = ScriptedGateway::new(["baseline", "plan", "draft", "APPROVED"]);
        let orchestrator = Orchestrator::new(&gateway, "m");

        let results = orchestrator.run_both("task", 2).expect("run");

        let keys: Vec<String> = results.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["single", "multi"]);
        assert_eq!(results[&RunMode::Single].final_answer, "baseline");
        assert_eq!(results[&RunMode::Multi].final_answer, "draft");
        // Baseline ran to completion before the planner was consulted.
        assert_eq!(
            gateway.systems()[..2],
            [
                roles::SINGLE_AGENT.system_message.to_string(),
                roles::PLANNER.system_message.to_string()
            ]
        );
    }

    #[test]
    fn run_selection_orders_modes() {
        assert_eq!(RunSelection::Single.modes(), [RunMode::Single]);
        assert_eq!(RunSelection::Multi.modes(), [RunMode::Multi]);
        assert_eq!(
            RunSelection::Both.modes(),
            [RunMode::Single, RunMode::Multi]
        );
    }

    #[test]
    fn failure_in_second_mode_discards_everything() {
        let gateway = ScriptedGateway::new(["baseline"]);
        let orchestrator = Orchestrator::new(&gateway, "m");

        let err = orchestrator.run_both("task", 2).unwrap_err();

        assert!(err.to_string().contains("exhausted"));
    }
}
