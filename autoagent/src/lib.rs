//! Single-agent baseline versus a Planner -> Executor -> Critic revision loop.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (data model, critic verdicts,
//!   evaluation metrics). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (environment and TOML config, the
//!   HTTP model gateway, prompt templates, JSON run logs). Isolated behind the
//!   [`io::gateway::Gateway`] trait so tests can script model replies.
//!
//! Orchestration modules ([`agents`], [`revision`], [`orchestrate`]) combine the
//! two to implement the CLI's run modes.

pub mod agents;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod orchestrate;
pub mod report;
pub mod revision;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
