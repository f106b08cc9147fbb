use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Token budget used when the configuration does not name one
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Sampling temperature used when the configuration does not name one
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

/// Settings for one chat client, read once at construction time
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Bearer credential
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub model: String,
    /// Per-request timeout in seconds, 0 disables it
    #[serde(default)]
    pub timeout: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Full chat-completions endpoint URL
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("max_tokens", &self.max_tokens)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            model: String::new(),
            timeout: 0,
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: String::new(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Configured timeout, `None` when disabled
    pub fn timeout_duration(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }

    /// Parse a YAML document holding a `huggingface:` section
    pub fn from_yaml_str(data: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_yaml::from_str(data)?;
        Ok(file.huggingface)
    }
}

/// On-disk configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub huggingface: ClientConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}
