//! # hugchat-llm-api
//!
//! Transport layer for talking to a chat-completion endpoint such as the
//! Hugging Face router:
//! - `ChatTransport`: one request/response cycle, no retries
//! - `HttpTransport`: reqwest implementation with bearer authentication
//! - `ChatError`: the error taxonomy shared with the session engine
//! - `ClientConfig`: the typed `huggingface:` configuration section
//! - `HubClient`: read-only model discovery listing
//!
//! ## Example
//!
//! ```rust,no_run
//! use hugchat_llm_api::{ChatTransport, ClientConfig, HttpTransport};
//! use hugchat_logging::NoopLogger;
//! use hugchat_models::{ChatPayload, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hugchat_llm_api::ChatError> {
//!     let config = ClientConfig::new(
//!         "https://router.huggingface.co/v1/chat/completions",
//!         "hf_your_token",
//!         "meta-llama/Llama-3.1-8B-Instruct",
//!     );
//!     let transport = HttpTransport::from_config(&config)?;
//!
//!     let payload = ChatPayload {
//!         model: config.model.clone(),
//!         messages: vec![Message::user("Hello!")],
//!         max_tokens: config.max_tokens,
//!         temperature: config.temperature,
//!     };
//!
//!     let response = transport.execute(&payload, &NoopLogger).await?;
//!     if let Some(choice) = response.first_choice() {
//!         println!("Response: {}", choice.message.content);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod hub;


// Re-export commonly used types
pub use client::{ChatTransport, HttpTransport};
pub use config::{ClientConfig, ConfigError, ConfigFile, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use error::ChatError;
pub use hub::{HubClient, HubError, ModelQuery, HUB_MODELS_URL};
pub use reqwest::StatusCode;
