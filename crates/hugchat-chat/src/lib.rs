//! # hugchat-chat
//!
//! Conversation engine on top of a [`ChatTransport`]: keeps the running
//! history, builds each request payload, retries truncated completions with
//! a doubled token budget, and commits an exchange to history only once it
//! has fully succeeded.

pub mod session;

pub use session::{ChatSession, SessionSettings, MAX_TOKENS_CEILING};

pub use hugchat_llm_api::{ChatError, ChatTransport};
