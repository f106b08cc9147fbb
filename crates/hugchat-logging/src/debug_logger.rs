use colored::Colorize;
use std::sync::Arc;

use hugchat_models::ChatPayload;
use crate::request_logger::{log_request, log_response};

/// Diagnostic sink injected into the transport and the session.
///
/// Implementations only observe; nothing they do may influence control flow.
pub trait DebugLogger: Send + Sync {
    /// Whether anything will be written. Callers skip building messages when false.
    fn enabled(&self) -> bool {
        true
    }

    /// One-line progress event
    fn event(&self, message: &str);

    /// Outgoing request about to be sent
    fn request(&self, _url: &str, _payload: &ChatPayload, _credential: &str) {}

    /// Raw response as received, before decoding
    fn response(
        &self,
        _status: &reqwest::StatusCode,
        _headers: &reqwest::header::HeaderMap,
        _body: &str,
    ) {
    }
}

/// Logger that discards everything (the default)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl DebugLogger for NoopLogger {
    fn enabled(&self) -> bool {
        false
    }

    fn event(&self, _message: &str) {}
}

/// Colored console output for debug mode
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogger;

impl DebugLogger for ConsoleLogger {
    fn event(&self, message: &str) {
        println!("{} {}", "🔧 DEBUG:".bright_black(), message.bright_black());
    }

    fn request(&self, url: &str, payload: &ChatPayload, credential: &str) {
        log_request(url, payload, credential, true);
    }

    fn response(
        &self,
        status: &reqwest::StatusCode,
        headers: &reqwest::header::HeaderMap,
        body: &str,
    ) {
        log_response(status, headers, body, true);
    }
}

/// Fans every call out to several loggers
#[derive(Default, Clone)]
pub struct TeeLogger {
    loggers: Vec<Arc<dyn DebugLogger>>,
}

impl TeeLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, logger: Arc<dyn DebugLogger>) -> Self {
        self.loggers.push(logger);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl DebugLogger for TeeLogger {
    fn enabled(&self) -> bool {
        self.loggers.iter().any(|l| l.enabled())
    }

    fn event(&self, message: &str) {
        for logger in &self.loggers {
            logger.event(message);
        }
    }

    fn request(&self, url: &str, payload: &ChatPayload, credential: &str) {
        for logger in &self.loggers {
            logger.request(url, payload, credential);
        }
    }

    fn response(
        &self,
        status: &reqwest::StatusCode,
        headers: &reqwest::header::HeaderMap,
        body: &str,
    ) {
        for logger in &self.loggers {
            logger.response(status, headers, body);
        }
    }
}
