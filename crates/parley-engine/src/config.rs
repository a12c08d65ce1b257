//! Configuration for the chat widget.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the stock widget.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::responder::{DEFAULT_REPLY_DELAY, DEFAULT_REPLY_TEXT};

/// Longest reply delay a config file may ask for.
pub const MAX_REPLY_DELAY_MS: u64 = 60_000;

/// Chat widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Label shown above assistant messages.
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Placeholder shown in the empty input field.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Text of every simulated reply.
    #[serde(default = "default_reply_text")]
    pub reply_text: String,

    /// Milliseconds between a submission and its reply.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// Whether a new conversation starts with the demo exchange.
    #[serde(default = "default_seed_welcome")]
    pub seed_welcome: bool,
}

fn default_assistant_name() -> String {
    "WebScraper AI".into()
}

fn default_placeholder() -> String {
    "Message WebScraper AI...".into()
}

fn default_reply_text() -> String {
    DEFAULT_REPLY_TEXT.into()
}

#[allow(clippy::cast_possible_truncation)]
fn default_reply_delay_ms() -> u64 {
    DEFAULT_REPLY_DELAY.as_millis() as u64
}

fn default_seed_welcome() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            assistant_name: default_assistant_name(),
            placeholder: default_placeholder(),
            reply_text: default_reply_text(),
            reply_delay_ms: default_reply_delay_ms(),
            seed_welcome: default_seed_welcome(),
        }
    }
}

impl ChatConfig {
    /// Load configuration from a file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot rule out on its own.
    ///
    /// Replies become messages, and message text is never blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reply_text.trim().is_empty() {
            return Err(ConfigError::Invalid("reply_text must not be blank".into()));
        }
        if self.reply_delay_ms > MAX_REPLY_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "reply_delay_ms must be at most {MAX_REPLY_DELAY_MS}, got {}",
                self.reply_delay_ms
            )));
        }
        Ok(())
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reply delay as a `Duration`.
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading config.
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// A value parsed but is not allowed.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
