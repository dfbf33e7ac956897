//! Prompt rendering for the revision loop.
//!
//! Each agent turn after the planner is rendered from a bundled template so
//! the exact wire text stays reviewable next to the code.

use anyhow::Result;
use minijinja::{Environment, context};
use tracing::debug;

const EXECUTOR_TEMPLATE: &str = include_str!("prompts/executor.txt");
const CRITIC_TEMPLATE: &str = include_str!("prompts/critic.txt");
const EXECUTOR_REVISION_TEMPLATE: &str = include_str!("prompts/executor_revision.txt");

/// Template engine wrapper around minijinja.
pub struct PromptEngine {
    env: Environment<'static>,
}

impl Default for PromptEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_template("executor", EXECUTOR_TEMPLATE)
            .expect("executor template should be valid");
        env.add_template("critic", CRITIC_TEMPLATE)
            .expect("critic template should be valid");
        env.add_template("executor_revision", EXECUTOR_REVISION_TEMPLATE)
            .expect("executor revision template should be valid");
        Self { env }
    }

    /// Planner sees nothing but the raw task.
    pub fn planner(&self, task: &str) -> String {
        task.to_string()
    }

    /// First executor pass: task plus plan.
    pub fn executor(&self, task: &str, plan: &str) -> Result<String> {
        self.render("executor", context! { task, plan })
    }

    /// Critic review of the current executor output.
    pub fn critic(&self, task: &str, plan: &str, exec_output: &str) -> Result<String> {
        self.render("critic", context! { task, plan, exec_output })
    }

    /// Executor revision: adds the critic feedback and the output being revised.
    pub fn executor_revision(
        &self,
        task: &str,
        plan: &str,
        critic_feedback: &str,
        exec_output: &str,
    ) -> Result<String> {
        self.render(
            "executor_revision",
            context! { task, plan, critic_feedback, exec_output },
        )
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String> {
        let rendered = self.env.get_template(name)?.render(ctx)?;
        debug!(template = name, bytes = rendered.len(), "rendered prompt");
        Ok(rendered)
    }
}
