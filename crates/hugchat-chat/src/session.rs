use std::fmt;
use std::sync::Arc;

use hugchat_llm_api::{ChatError, ChatTransport, ClientConfig, HttpTransport};
use hugchat_logging::{ConsoleLogger, DebugLogger, NoopLogger};
use hugchat_models::{ChatPayload, ChatResponse, Message, Usage};

/// Largest token budget the retry loop will ask for
pub const MAX_TOKENS_CEILING: u32 = 8192;

/// Per-session request defaults
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl From<&ClientConfig> for SessionSettings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// One conversation with the remote model.
///
/// `send_message` borrows the session mutably, so there is never more than
/// one call in flight per session.
pub struct ChatSession {
    transport: Arc<dyn ChatTransport>,
    settings: SessionSettings,
    history: Vec<Message>,
    logger: Arc<dyn DebugLogger>,
    last_usage: Option<Usage>,
    total_tokens_used: u64,
}

impl fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSession")
            .field("settings", &self.settings)
            .field("history_len", &self.history.len())
            .field("debug", &self.logger.enabled())
            .finish()
    }
}

impl ChatSession {
    pub fn new(transport: Arc<dyn ChatTransport>, settings: SessionSettings) -> Self {
        Self {
            transport,
            settings,
            history: Vec::new(),
            logger: Arc::new(NoopLogger),
            last_usage: None,
            total_tokens_used: 0,
        }
    }

    /// Session talking HTTP to `config.base_url`. No network traffic happens here.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ChatError> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport), SessionSettings::from(config)))
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Payload for `text` against the current history.
    ///
    /// The new user message is placed first, followed by the existing history
    /// oldest first. Endpoints that expect chronological order will see the
    /// latest turn at the head of the list.
    pub fn build_payload(&self, text: &str) -> ChatPayload {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.push(Message::user(text));
        messages.extend(self.history.iter().cloned());

        ChatPayload {
            model: self.settings.model.clone(),
            messages,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }

    /// Send one user message and return the assistant's reply.
    ///
    /// Truncated completions are retried with a doubled `max_tokens` until the
    /// model reports `"stop"` or the budget would pass [`MAX_TOKENS_CEILING`].
    /// History gains the user and assistant messages only on success.
    pub async fn send_message(&mut self, text: &str) -> Result<String, ChatError> {
        let mut payload = self.build_payload(text);
        let mut tokens_this_call: u64 = 0;

        loop {
            let response = self.transport.execute(&payload, self.logger.as_ref()).await?;
            tokens_this_call = tokens_this_call.saturating_add(response.usage.total_tokens);

            let Some(choice) = response.first_choice() else {
                return Err(missing_choice(response));
            };

            if choice.is_complete() {
                let content = choice.message.content.clone();

                self.history.push(Message::user(text));
                self.history.push(Message::assistant(content.clone()));
                self.last_usage = Some(response.usage);
                self.total_tokens_used = self.total_tokens_used.saturating_add(tokens_this_call);

                if self.logger.enabled() {
                    self.logger.event(&format!(
                        "Exchange complete, history now holds {} messages",
                        self.history.len()
                    ));
                }
                return Ok(content);
            }

            let next = payload.max_tokens.max(1).saturating_mul(2);
            if next > MAX_TOKENS_CEILING {
                return Err(ChatError::MaxTokensExceeded {
                    limit: MAX_TOKENS_CEILING,
                    response: Box::new(response),
                });
            }

            if self.logger.enabled() {
                self.logger.event(&format!(
                    "Response truncated (finish_reason: {}), retrying with max_tokens {}",
                    choice.finish_reason.as_deref().unwrap_or("none"),
                    next
                ));
            }
            payload.max_tokens = next;
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        if self.logger.enabled() {
            self.logger.event("Conversation history cleared");
        }
    }

    /// Committed turns, oldest first
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Owned copy of the history, unaffected by later calls
    pub fn history_snapshot(&self) -> Vec<Message> {
        self.history.clone()
    }

    /// Switch console debug output on or off
    pub fn enable_debugging(&mut self, enabled: bool) {
        if enabled {
            self.set_logger(Arc::new(ConsoleLogger));
        } else {
            self.set_logger(Arc::new(NoopLogger));
        }
    }

    pub fn set_logger(&mut self, logger: Arc<dyn DebugLogger>) {
        self.logger = logger;
    }

    pub fn debug_enabled(&self) -> bool {
        self.logger.enabled()
    }

    /// Usage block of the last successful exchange
    pub fn last_usage(&self) -> Option<Usage> {
        self.last_usage
    }

    /// Tokens reported across every successful exchange, retries included
    pub fn total_tokens_used(&self) -> u64 {
        self.total_tokens_used
    }
}

/// A decoded body with no choices: the remote's own error text wins when
/// present, otherwise the body did not have the expected shape.
fn missing_choice(response: ChatResponse) -> ChatError {
    match response.error_text().map(str::to_string) {
        Some(message) => ChatError::Remote {
            status: hugchat_llm_api::StatusCode::OK,
            message,
            response: Box::new(response),
        },
        None => ChatError::Decoding {
            reason: "response contained no choices".to_string(),
            response: Box::new(response),
        },
    }
}
