#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "hf_test_token";
pub const CHAT_PATH: &str = "/v1/chat/completions";
pub const MODELS_PATH: &str = "/api/models";

/// Mock chat-completions endpoint
pub struct ChatMockServer {
    server: MockServer,
}

impl ChatMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Full endpoint URL as it would appear in `base_url`
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.server.uri(), CHAT_PATH)
    }

    pub fn models_url(&self) -> String {
        format!("{}{}", self.server.uri(), MODELS_PATH)
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Successful completion, only matched when the bearer token is present
    pub async fn mock_chat_success(&self, response_content: &str) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(response_content, "stop")))
            .mount(&self.server)
            .await;
    }

    /// Truncated completion returned whenever the request carries `max_tokens`
    pub async fn mock_chat_truncated_at(&self, max_tokens: u32, partial: &str) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .and(body_partial_json(json!({ "max_tokens": max_tokens })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(partial, "length")))
            .mount(&self.server)
            .await;
    }

    /// Complete answer returned whenever the request carries `max_tokens`
    pub async fn mock_chat_complete_at(&self, max_tokens: u32, content: &str) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .and(body_partial_json(json!({ "max_tokens": max_tokens })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(content, "stop")))
            .mount(&self.server)
            .await;
    }

    /// Error status with a JSON body
    pub async fn mock_chat_error(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Success status with a raw, possibly malformed body
    pub async fn mock_chat_raw(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_models(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path(MODELS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_models_error(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(MODELS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Bodies of every chat request received so far
    pub async fn chat_requests(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == CHAT_PATH)
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}

/// Chat completion body with a single choice
pub fn completion(content: &str, finish_reason: &str) -> Value {
    json!({
        "id": "chatcmpl_test123",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": finish_reason
        }],
        "usage": {
            "prompt_tokens": 10,
            "completion_tokens": 20,
            "total_tokens": 30
        }
    })
}
