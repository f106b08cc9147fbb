use hugchat_models::ChatResponse;
use reqwest::StatusCode;

/// Everything that can go wrong while exchanging one chat message.
///
/// Truncated completions are not represented here: the session retries
/// those itself and only surfaces `MaxTokensExceeded` once the budget
/// ceiling is hit.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Missing or unusable settings. Never retried.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request payload could not be serialized
    #[error("failed to marshal payload: {0}")]
    Encoding(#[source] serde_json::Error),

    /// Connection, IO or timeout failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status, or a body reporting an error instead of choices
    #[error("HTTP error: status code {status}, error: {message}")]
    Remote {
        status: StatusCode,
        message: String,
        response: Box<ChatResponse>,
    },

    /// Body did not match the expected schema. `response.error` holds the raw body.
    #[error("failed to unmarshal response: {reason}")]
    Decoding {
        reason: String,
        response: Box<ChatResponse>,
    },

    /// The model kept truncating until the doubled budget passed the ceiling
    #[error("max tokens exceeded the limit of {limit}")]
    MaxTokensExceeded {
        limit: u32,
        response: Box<ChatResponse>,
    },
}

impl ChatError {
    /// The response obtained before failing, when there was one
    pub fn response(&self) -> Option<&ChatResponse> {
        match self {
            ChatError::Remote { response, .. }
            | ChatError::Decoding { response, .. }
            | ChatError::MaxTokensExceeded { response, .. } => Some(response),
            ChatError::Config(_) | ChatError::Encoding(_) | ChatError::Transport(_) => None,
        }
    }

    /// HTTP status for remote failures
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ChatError::Remote { status, .. } => Some(*status),
            ChatError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Short category name, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::Config(_) => "config",
            ChatError::Encoding(_) => "encoding",
            ChatError::Transport(_) => "transport",
            ChatError::Remote { .. } => "remote",
            ChatError::Decoding { .. } => "decoding",
            ChatError::MaxTokensExceeded { .. } => "max_tokens",
        }
    }
}
