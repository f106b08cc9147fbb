use async_trait::async_trait;

use hugchat_logging::DebugLogger;
use hugchat_models::{ChatPayload, ChatResponse};
use crate::error::ChatError;

pub mod http;

pub use http::HttpTransport;

/// One request/response cycle against the chat endpoint.
///
/// Implementations never retry and never touch conversation state; the
/// session engine owns both concerns.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn execute(
        &self,
        payload: &ChatPayload,
        logger: &dyn DebugLogger,
    ) -> Result<ChatResponse, ChatError>;
}
