use serde::{Deserialize, Serialize};
use super::types::Message;

/// Chat completion request body.
///
/// Built fresh for every call and discarded afterwards; only `max_tokens`
/// changes while a single call is being retried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
}
