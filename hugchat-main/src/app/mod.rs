use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;

use hugchat_chat::{ChatError, ChatSession};
use hugchat_llm_api::{ClientConfig, HubClient, ModelQuery};
use hugchat_logging::{ConsoleLogger, DebugLogger, NoopLogger, RequestFileLogger, TeeLogger};

pub mod repl;

pub use repl::run_repl_mode;

/// Which diagnostic sinks are active. The file logger survives `/debug` toggles.
pub struct LoggerSettings {
    pub debug: bool,
    file: Option<Arc<RequestFileLogger>>,
}

impl LoggerSettings {
    pub fn new(debug: bool, log_requests: bool) -> Result<Self> {
        let file = if log_requests {
            let logger = RequestFileLogger::in_default_dir()
                .context("Failed to prepare request log directory")?;
            println!(
                "{} {}",
                "📝 Logging requests to".bright_black(),
                logger.logs_dir().display().to_string().bright_black()
            );
            Some(Arc::new(logger))
        } else {
            None
        };

        Ok(Self { debug, file })
    }

    pub fn build(&self) -> Arc<dyn DebugLogger> {
        match (self.debug, &self.file) {
            (false, None) => Arc::new(NoopLogger),
            (true, None) => Arc::new(ConsoleLogger),
            (false, Some(file)) => file.clone(),
            (true, Some(file)) => Arc::new(
                TeeLogger::new()
                    .with(Arc::new(ConsoleLogger))
                    .with(file.clone()),
            ),
        }
    }
}

/// Session with the configured logger attached
pub fn create_session(config: &ClientConfig, loggers: &LoggerSettings) -> Result<ChatSession> {
    let mut session = ChatSession::from_config(config).context("Failed to create chat session")?;
    session.set_logger(loggers.build());
    Ok(session)
}

/// Print a failed send, including the remote's own error text when it adds something
pub fn report_chat_error(err: &ChatError) {
    eprintln!("{} {}", "Error:".bright_red().bold(), err);

    if let Some(remote) = err.response().and_then(|r| r.error_text()) {
        if !err.to_string().contains(remote) {
            eprintln!("{} {}", "Remote error:".bright_red(), remote);
        }
    }
}

/// Send one message, print the reply and return
pub async fn run_one_shot(config: &ClientConfig, loggers: &LoggerSettings, text: &str) -> Result<()> {
    let mut session = create_session(config, loggers)?;

    match session.send_message(text).await {
        Ok(reply) => {
            println!("{}", reply);
            Ok(())
        }
        Err(e) => {
            report_chat_error(&e);
            anyhow::bail!("chat request failed ({})", e.kind())
        }
    }
}

/// Print the hub model listing
pub async fn list_models(token: &str, query: &ModelQuery, logger: &dyn DebugLogger) -> Result<()> {
    let hub = HubClient::new(token);
    let models = hub
        .list_models(query, logger)
        .await
        .context("Failed to list models")?;

    if models.is_empty() {
        println!("{}", "No models found".bright_yellow());
        return Ok(());
    }

    println!("{}", format!("📦 {} models:", models.len()).bright_cyan().bold());
    for model in &models {
        match &model.pipeline_tag {
            Some(tag) => println!("  {} {}", model.model_id.bright_white(), format!("({})", tag).bright_black()),
            None => println!("  {}", model.model_id.bright_white()),
        }
    }
    Ok(())
}
