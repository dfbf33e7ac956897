//! Model gateway: one blocking chat-completion round-trip per call.
//!
//! The [`Gateway`] trait decouples the revision loop from the HTTP backend.
//! Tests use scripted gateways that return queued replies without touching
//! the network.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::io::config::GatewayConfig;

/// Abstraction over model backends.
///
/// Calls are synchronous: the caller blocks until the completion arrives, so
/// at most one request is ever in flight.
pub trait Gateway {
    /// Send `prompt` under the `system` instruction and return the raw completion.
    fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

/// Failure reported by the model backend.
#[derive(Debug)]
pub enum GatewayError {
    /// The request never produced an HTTP response.
    Transport(reqwest::Error),
    /// The backend answered with a non-success status.
    Status { status: u16, body: String },
    /// The response carried no completion text.
    EmptyCompletion,
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "gateway request failed: {}", e),
            Self::Status { status, body } => write!(f, "gateway returned {}: {}", status, body),
            Self::EmptyCompletion => write!(f, "gateway response contained no completion"),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

/// OpenAI-compatible gateway. Speaks the Azure deployment dialect when
/// `api_type` is `azure`, the plain `/chat/completions` dialect otherwise.
pub struct OpenAiGateway {
    client: Client,
    config: GatewayConfig,
}

impl OpenAiGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        // No client timeout: a hung call blocks the run.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("build http client")?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        if self.config.is_azure() {
            format!(
                "{}/openai/deployments/{}/chat/completions",
                base, self.config.deployment_name
            )
        } else {
            format!("{}/chat/completions", base)
        }
    }
}

impl Gateway for OpenAiGateway {
    #[instrument(skip_all, fields(deployment = %self.config.deployment_name, prompt_len = prompt.len()))]
    fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: (!self.config.is_azure()).then(|| {
                self.config
                    .model_name
                    .clone()
                    .unwrap_or_else(|| self.config.deployment_name.clone())
            }),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let mut req = self.client.post(self.endpoint()).json(&body);
        if self.config.is_azure() {
            req = req
                .query(&[("api-version", self.config.api_version.as_str())])
                .header("api-key", &self.config.api_key);
        } else {
            req = req.bearer_auth(&self.config.api_key);
        }

        info!("sending chat completion");
        let response = req.send().map_err(GatewayError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "gateway call failed");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed: ChatResponse = response.json().map_err(GatewayError::Transport)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GatewayError::EmptyCompletion)?;
        debug!(completion_len = content.len(), "received completion");
        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
