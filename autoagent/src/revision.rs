//! Planner -> Executor -> Critic revision loop for multi mode.

use anyhow::Result;
use tracing::{info, instrument};

use crate::agents::{Agent, roles};
use crate::core::classifier::{CriticVerdict, classify_critic_reply};
use crate::core::types::Message;
use crate::io::gateway::Gateway;
use crate::io::prompt::PromptEngine;

/// Revision budget used when the caller does not pick one.
pub const DEFAULT_MAX_ROUNDS: u32 = 2;

/// Reason why the revision loop stopped.
///
/// Only traced; callers of multi mode see the same result shape either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStop {
    /// The critic approved the current executor output.
    Approved,
    /// The critic reply matched neither keyword.
    Unclear,
    /// `rounds` passed `max_rounds` after a revision.
    RoundsExhausted,
    /// `max_rounds` was 0, so the critic never ran.
    CriticSkipped,
}

/// Result of one revision loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionOutcome {
    pub transcript: Vec<Message>,
    /// Content of the last executor message.
    pub final_answer: String,
    /// Completed executor cycles, starting at 1 for the first draft.
    pub rounds: u32,
    pub stop: LoopStop,
}

/// Run the revision loop for `task`.
///
/// The round counter starts at 1 once the first draft exists and the critic
/// runs while `rounds <= max_rounds`. With `max_rounds = 0` the critic is
/// skipped and the first draft is final. Each revision adds one round, so the
/// counter may end at `max_rounds + 1`.
///
/// Gateway errors abort the loop and are returned unchanged.
#[instrument(skip_all, fields(max_rounds = max_rounds))]
pub fn run_revision_loop<G: Gateway>(
    gateway: &G,
    prompts: &PromptEngine,
    task: &str,
    max_rounds: u32,
) -> Result<RevisionOutcome> {
    let planner = Agent::new(roles::PLANNER, gateway);
    let executor = Agent::new(roles::EXECUTOR, gateway);
    let critic = Agent::new(roles::CRITIC, gateway);
    let mut transcript = Vec::new();

    let plan = planner.generate_reply(&prompts.planner(task))?;
    transcript.push(planner.message(plan.as_str()));

    let mut exec_output = executor.generate_reply(&prompts.executor(task, &plan)?)?;
    transcript.push(executor.message(exec_output.as_str()));
    let mut rounds = 1u32;

    let mut stop = if max_rounds == 0 {
        LoopStop::CriticSkipped
    } else {
        LoopStop::RoundsExhausted
    };
    while rounds <= max_rounds {
        let feedback = critic.generate_reply(&prompts.critic(task, &plan, &exec_output)?)?;
        transcript.push(critic.message(feedback.as_str()));

        let verdict = classify_critic_reply(&feedback);
        info!(round = rounds, ?verdict, "critic verdict");
        match verdict {
            CriticVerdict::Approved => {
                stop = LoopStop::Approved;
                break;
            }
            CriticVerdict::RevisionRequired => {
                let prompt = prompts.executor_revision(task, &plan, &feedback, &exec_output)?;
                exec_output = executor.generate_reply(&prompt)?;
                transcript.push(executor.message(exec_output.as_str()));
                rounds += 1;
            }
            CriticVerdict::Unclear => {
                stop = LoopStop::Unclear;
                break;
            }
        }
    }

    info!(rounds, ?stop, "revision loop finished");
    Ok(RevisionOutcome {
        transcript,
        final_answer: exec_output,
        rounds,
        stop,
    })
}
