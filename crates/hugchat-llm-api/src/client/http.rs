use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use std::fmt;

use hugchat_logging::DebugLogger;
use hugchat_models::{ChatPayload, ChatResponse};
use crate::client::ChatTransport;
use crate::config::ClientConfig;
use crate::error::ChatError;

/// reqwest-backed transport posting JSON to a single endpoint
pub struct HttpTransport {
    endpoint: String,
    credential: String,
    client: reqwest::Client,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("credential", &"[REDACTED]")
            .finish()
    }
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            credential: credential.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Build a transport from the `huggingface:` settings, applying the
    /// per-request timeout when one is configured.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout_duration() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            endpoint: config.base_url.clone(),
            credential: config.token.clone(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorization(&self) -> Result<HeaderValue, ChatError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.credential))
            .map_err(|_| {
                ChatError::Config(
                    "token contains characters not allowed in an HTTP header".to_string(),
                )
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn execute(
        &self,
        payload: &ChatPayload,
        logger: &dyn DebugLogger,
    ) -> Result<ChatResponse, ChatError> {
        if self.endpoint.trim().is_empty() {
            return Err(ChatError::Config("base_url is not set".to_string()));
        }

        if logger.enabled() {
            logger.event(&format!(
                "Calling API at {} with model {}",
                self.endpoint, payload.model
            ));
        }

        let body = serde_json::to_vec(payload).map_err(ChatError::Encoding)?;
        let authorization = self.authorization()?;

        logger.request(&self.endpoint, payload, &self.credential);

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();

        logger.event("Reading response body");
        let text = response.text().await?;

        logger.response(&status, &headers, &text);

        classify_response(status, &text)
    }
}

/// Turn a status and raw body into a decoded response or a classified error.
///
/// A non-success status always wins over decoding problems so the status
/// code reaches the caller; the raw body is preserved in `error` whenever
/// the remote did not supply its own error text.
pub(crate) fn classify_response(status: StatusCode, body: &str) -> Result<ChatResponse, ChatError> {
    let decoded = serde_json::from_str::<ChatResponse>(body);

    if !status.is_success() {
        let mut response = decoded.unwrap_or_else(|_| ChatResponse::from_error(body));
        let message = match response.error_text() {
            Some(text) => text.to_string(),
            None => {
                response.error = body.to_string();
                body.trim().to_string()
            }
        };
        return Err(ChatError::Remote {
            status,
            message,
            response: Box::new(response),
        });
    }

    decoded.map_err(|e| ChatError::Decoding {
        reason: e.to_string(),
        response: Box::new(ChatResponse::from_error(body)),
    })
}
