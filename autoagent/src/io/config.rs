//! Configuration: model gateway credentials from the environment and run
//! settings from an optional TOML file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::revision::DEFAULT_MAX_ROUNDS;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_API_BASE: &str = "OPENAI_API_BASE";
pub const OPENAI_API_VERSION: &str = "OPENAI_API_VERSION";
pub const OPENAI_DEPLOYMENT_NAME: &str = "OPENAI_DEPLOYMENT_NAME";
pub const OPENAI_API_TYPE: &str = "OPENAI_API_TYPE";
pub const OPENAI_MODEL_NAME: &str = "OPENAI_MODEL_NAME";

/// Variables that must be present and non-empty, in reporting order.
pub const REQUIRED_VARS: [&str; 4] = [
    OPENAI_API_KEY,
    OPENAI_API_BASE,
    OPENAI_API_VERSION,
    OPENAI_DEPLOYMENT_NAME,
];

const DEFAULT_API_TYPE: &str = "azure";

/// One or more required environment variables were absent or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingConfigError {
    pub missing: Vec<String>,
}

impl fmt::Display for MissingConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing required env vars: {} (set them in the environment or a .env file)",
            self.missing.join(", ")
        )
    }
}

impl std::error::Error for MissingConfigError {}

/// Connection settings for the model gateway.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// `azure` routes through deployment URLs; anything else uses the plain
    /// OpenAI-compatible `/chat/completions` endpoint.
    pub api_type: String,
    pub api_key: String,
    pub api_base: String,
    pub api_version: String,
    pub deployment_name: String,
    pub model_name: Option<String>,
}

impl GatewayConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, MissingConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, reporting every missing
    /// required variable at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MissingConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| get(*name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(MissingConfigError { missing });
        }

        let required = |name: &str| get(name).unwrap_or_default();
        let config = Self {
            api_type: get(OPENAI_API_TYPE).unwrap_or_else(|| DEFAULT_API_TYPE.to_string()),
            api_key: required(OPENAI_API_KEY),
            api_base: required(OPENAI_API_BASE),
            api_version: required(OPENAI_API_VERSION),
            deployment_name: required(OPENAI_DEPLOYMENT_NAME),
            model_name: get(OPENAI_MODEL_NAME),
        };
        debug!(?config, "loaded gateway config");
        Ok(config)
    }

    pub fn is_azure(&self) -> bool {
        self.api_type.eq_ignore_ascii_case(DEFAULT_API_TYPE)
    }

    /// Name recorded in run metadata: the deployment, falling back to the model.
    pub fn model(&self) -> &str {
        if self.deployment_name.is_empty() {
            self.model_name.as_deref().unwrap_or_default()
        } else {
            &self.deployment_name
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_type", &self.api_type)
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("api_version", &self.api_version)
            .field("deployment_name", &self.deployment_name)
            .field("model_name", &self.model_name)
            .finish()
    }
}

/// Run settings (TOML).
///
/// Every field is optional in the file; missing fields take the defaults the
/// CLI documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory that receives one JSON log per run.
    pub output_dir: PathBuf,

    /// Default revision budget for multi mode.
    pub max_rounds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("runs"),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(anyhow!("output_dir must not be empty"));
        }
        Ok(())
    }
}

/// Load settings from a TOML file.
///
/// If the file is missing, returns `Settings::default()`.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        debug!(path = %path.display(), "settings file absent, using defaults");
        let settings = Settings::default();
        settings.validate()?;
        return Ok(settings);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let settings: Settings =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    settings.validate()?;
    Ok(settings)
}
