//! Test-only helpers: a scripted model gateway.

use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::{Result, anyhow};

use crate::io::gateway::{Gateway, GatewayError};

/// One queued gateway outcome.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    /// Fail the call as if the backend returned `status`.
    Fail { status: u16, body: String },
}

/// A recorded gateway call, in the order it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCall {
    pub system: String,
    pub prompt: String,
}

/// Gateway that replays queued replies and records every call.
///
/// Running out of replies is an error, so a loop that calls more often than
/// scripted fails loudly instead of hanging.
pub struct ScriptedGateway {
    replies: RefCell<VecDeque<ScriptedReply>>,
    calls: RefCell<Vec<GatewayCall>>,
}

impl ScriptedGateway {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_replies(
            replies
                .into_iter()
                .map(|r| ScriptedReply::Text(r.into()))
                .collect(),
        )
    }

    pub fn from_replies(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.borrow().clone()
    }

    /// System instructions of every call, in order.
    pub fn systems(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.system.clone()).collect()
    }

    pub fn remaining(&self) -> usize {
        self.replies.borrow().len()
    }
}

impl Gateway for ScriptedGateway {
    fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        self.calls.borrow_mut().push(GatewayCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
        });
        match self.replies.borrow_mut().pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Fail { status, body }) => {
                Err(GatewayError::Status { status, body }.into())
            }
            None => Err(anyhow!("scripted gateway exhausted")),
        }
    }
}
