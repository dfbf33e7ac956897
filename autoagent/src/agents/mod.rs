//! Agents: a fixed role bound to the shared model gateway.

use anyhow::Result;
use tracing::{debug, instrument};

use crate::core::types::Message;
use crate::io::gateway::Gateway;

pub mod roles;

pub use roles::AgentRole;

/// Role-bound handle over a gateway. Each reply is exactly one gateway call.
pub struct Agent<'g, G: Gateway> {
    role: AgentRole,
    gateway: &'g G,
}

impl<'g, G: Gateway> Agent<'g, G> {
    pub fn new(role: AgentRole, gateway: &'g G) -> Self {
        Self { role, gateway }
    }

    pub fn name(&self) -> &'static str {
        self.role.name
    }

    /// Ask the model for this role's reply to `prompt`. Gateway errors are
    /// returned unchanged.
    #[instrument(skip_all, fields(agent = self.role.name))]
    pub fn generate_reply(&self, prompt: &str) -> Result<String> {
        let reply = self.gateway.complete(self.role.system_message, prompt)?;
        debug!(reply_len = reply.len(), "agent replied");
        Ok(reply)
    }

    /// Wrap `content` as a transcript entry attributed to this agent.
    pub fn message(&self, content: impl Into<String>) -> Message {
        Message::assistant(self.role.name, content)
    }
}
