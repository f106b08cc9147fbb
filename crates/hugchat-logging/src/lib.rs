// Logging module - debug output and request/response dumps
pub mod debug_logger;
pub mod request_logger;

use std::path::PathBuf;
use anyhow::{Result, Context};

pub use debug_logger::{DebugLogger, NoopLogger, ConsoleLogger, TeeLogger};
pub use request_logger::{
    log_request,
    log_response,
    RequestFileLogger,
};

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Mask a credential for display, keeping only a short prefix
pub fn mask_credential(credential: &str) -> String {
    if credential.is_empty() {
        return "<none>".to_string();
    }
    format!("{}***", credential.chars().take(6).collect::<String>())
}

/// Get or create the base hugchat directory (~/.hugchat)
pub fn get_hugchat_dir() -> Result<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Failed to get home directory")?;

    let hugchat_dir = PathBuf::from(home_dir).join(".hugchat");

    if !hugchat_dir.exists() {
        std::fs::create_dir_all(&hugchat_dir)
            .context("Failed to create hugchat directory")?;
    }

    Ok(hugchat_dir)
}

/// Get or create the logs directory (~/.hugchat/logs)
pub fn get_logs_dir() -> Result<PathBuf> {
    let logs_dir = get_hugchat_dir()?.join("logs");

    if !logs_dir.exists() {
        std::fs::create_dir_all(&logs_dir)
            .context("Failed to create logs directory")?;
    }

    Ok(logs_dir)
}
