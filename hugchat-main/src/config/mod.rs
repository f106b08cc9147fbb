use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use hugchat_llm_api::ClientConfig;

use crate::cli::Cli;

/// Directory and file name of the configuration, relative to the home directory
const CONFIG_DIR: &str = ".clai";
const CONFIG_FILE: &str = "huggingface.yaml";

/// `~/.clai/huggingface.yaml`
pub fn default_config_path() -> Result<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Failed to get home directory")?;

    Ok(PathBuf::from(home_dir).join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Read and parse the configuration file at `path`
pub fn load_config(path: &Path) -> Result<ClientConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    ClientConfig::from_yaml_str(&data)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Values given on the command line or in the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub token: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl From<&Cli> for Overrides {
    fn from(cli: &Cli) -> Self {
        Self {
            token: cli.token.clone(),
            model: cli.model.clone(),
            base_url: cli.base_url.clone(),
        }
    }
}

/// Replace file values with non-empty overrides
pub fn apply_overrides(mut config: ClientConfig, overrides: &Overrides) -> ClientConfig {
    fn pick(target: &mut String, value: &Option<String>) {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            *target = value.to_string();
        }
    }

    pick(&mut config.token, &overrides.token);
    pick(&mut config.model, &overrides.model);
    pick(&mut config.base_url, &overrides.base_url);
    config
}

/// Resolve the effective configuration.
///
/// An explicit `--config` path must exist. A missing default file is only
/// reported, so flags and environment variables alone can drive the client.
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let path = default_config_path()?;
            if path.exists() {
                load_config(&path)?
            } else {
                if cli.debug {
                    println!(
                        "{} {}",
                        "🔧 DEBUG:".bright_black(),
                        format!("No config file at {}, using defaults", path.display()).bright_black()
                    );
                }
                ClientConfig::default()
            }
        }
    };

    Ok(apply_overrides(config, &Overrides::from(cli)))
}

/// Fail early with a readable message when chatting cannot work
pub fn ensure_chat_ready(config: &ClientConfig) -> Result<()> {
    if config.base_url.trim().is_empty() {
        bail!("base_url is not set (add it to the config file or pass --base-url)");
    }
    if config.model.trim().is_empty() {
        bail!("model is not set (add it to the config file or pass --model)");
    }
    Ok(())
}
