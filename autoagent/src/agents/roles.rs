//! Fixed agent personas.

/// A named system instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentRole {
    pub name: &'static str,
    pub system_message: &'static str,
}

pub const PLANNER: AgentRole = AgentRole {
    name: "Planner",
    system_message: "You are Planner. Create a concise plan. Do not produce the final solution. \
                     Output: Understanding, Plan bullets, Success criteria.",
};

pub const EXECUTOR: AgentRole = AgentRole {
    name: "Executor",
    system_message: "You are Executor. Produce the final solution following the plan. \
                     If Critic feedback exists, revise accordingly. Be clear and structured.",
};

pub const CRITIC: AgentRole = AgentRole {
    name: "Critic",
    system_message: "You are Critic. Review the Executor output against the task and plan. \
                     Reply with either 'APPROVED' or 'REVISION REQUIRED' and bullet feedback. \
                     Be strict and specific.",
};

/// Baseline persona for single mode.
pub const SINGLE_AGENT: AgentRole = AgentRole {
    name: "SingleAgent",
    system_message: "You are a helpful assistant. Answer the user's task as best as possible.",
};
