use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;

use hugchat_logging::{safe_truncate, DebugLogger};
use hugchat_models::HubModel;

/// Model discovery endpoint
pub const HUB_MODELS_URL: &str = "https://huggingface.co/api/models";

#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error: status code {status}, body: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Optional filters for the listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelQuery {
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl ModelQuery {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// Read-only client for the model listing. Independent of any chat session.
pub struct HubClient {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HubClient {
    /// An empty token means anonymous access
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            url: HUB_MODELS_URL.to_string(),
            token: (!token.is_empty()).then_some(token),
            client: reqwest::Client::new(),
        }
    }

    /// Point the client at another listing URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub async fn list_models(
        &self,
        query: &ModelQuery,
        logger: &dyn DebugLogger,
    ) -> Result<Vec<HubModel>, HubError> {
        if logger.enabled() {
            logger.event(&format!("Fetching available models from {}", self.url));
        }

        let mut request = self.client.get(&self.url).query(&query.to_params());
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(HubError::Status {
                status,
                body: safe_truncate(&body, 500),
            });
        }

        let models: Vec<HubModel> = serde_json::from_str(&body)?;
        if logger.enabled() {
            logger.event(&format!("Fetched {} models", models.len()));
        }
        Ok(models)
    }
}
