use serde::{Deserialize, Deserializer, Serialize};
use super::types::{deserialize_null_default, deserialize_string_or_null, Message};

/// Finish reason reported when the model reached a natural end
pub const FINISH_REASON_STOP: &str = "stop";

/// Token usage information from API response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub prompt_tokens: u64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub completion_tokens: u64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub total_tokens: u64,
}

/// Chat API response structure.
///
/// Every field defaults so that bare error bodies such as
/// `{"error":"unauthorized"}` still decode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_text: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_error_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub error: String,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub object: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub created: i64,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub model: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub choices: Vec<Choice>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub usage: Usage,
}

impl ChatResponse {
    /// Response carrying nothing but an error text, used when the body
    /// could not be decoded at all.
    pub fn from_error(text: impl Into<String>) -> Self {
        Self {
            error: text.into(),
            ..Self::default()
        }
    }

    /// The only choice the client ever consults
    pub fn first_choice(&self) -> Option<&Choice> {
        self.choices.first()
    }

    /// Structured error text reported by the remote, if any
    pub fn error_text(&self) -> Option<&str> {
        let trimmed = self.error.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// Choice structure within chat response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub index: u32,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub message: Message,
}

impl Choice {
    /// True only for the terminal-stop sentinel. Everything else, including a
    /// missing reason, counts as truncated output.
    pub fn is_complete(&self) -> bool {
        self.finish_reason.as_deref() == Some(FINISH_REASON_STOP)
    }
}

/// Accept the `error` field as a plain string, an object carrying a
/// `message`, or anything else (kept as its JSON text).
fn deserialize_error_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Object(ref map) => match map.get("message") {
            Some(serde_json::Value::String(message)) => message.clone(),
            _ => value.to_string(),
        },
        other => other.to_string(),
    })
}
