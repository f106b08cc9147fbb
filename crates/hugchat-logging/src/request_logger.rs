use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use hugchat_models::ChatPayload;
use crate::debug_logger::DebugLogger;
use crate::{get_logs_dir, mask_credential, safe_truncate};

const CONSOLE_BODY_LIMIT: usize = 5000;

/// Log HTTP request details for debugging (console output)
pub fn log_request(url: &str, payload: &ChatPayload, credential: &str, verbose: bool) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_cyan());
    println!("{}", "🔍 HTTP REQUEST DEBUG".bright_cyan().bold());
    println!("{}", "═".repeat(80).bright_cyan());

    println!("{}: {}", "URL".bright_yellow(), url);
    if let Ok(parsed_url) = reqwest::Url::parse(url) {
        println!("{}: {}", "Host".bright_yellow(), parsed_url.host_str().unwrap_or("unknown"));
    }
    println!("{}: {}", "Model".bright_yellow(), payload.model);
    println!("{}: {}", "Max tokens".bright_yellow(), payload.max_tokens);
    println!("{}: {}", "Messages".bright_yellow(), payload.messages.len());

    println!("\n{}", "Headers:".bright_yellow());
    println!("  Content-Type: application/json");
    println!("  Authorization: Bearer {}", mask_credential(credential));

    println!("\n{}", "Request Body:".bright_yellow());
    match serde_json::to_string_pretty(payload) {
        Ok(json) => print_truncated(&json),
        Err(e) => println!("{}", format!("Error serializing request: {}", e).red()),
    }

    println!("{}", "═".repeat(80).bright_cyan());
    println!();
}

/// Log HTTP response details for debugging (console output)
pub fn log_response(
    status: &reqwest::StatusCode,
    headers: &reqwest::header::HeaderMap,
    body: &str,
    verbose: bool,
) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_green());
    println!("{}", "📥 HTTP RESPONSE DEBUG".bright_green().bold());
    println!("{}", "═".repeat(80).bright_green());

    println!("{}: {} {}",
        "Status".bright_yellow(),
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    println!("\n{}", "Headers:".bright_yellow());
    for (name, value) in headers.iter() {
        if let Ok(val_str) = value.to_str() {
            println!("  {}: {}", name.as_str().bright_white(), val_str);
        }
    }

    println!("\n{}", "Response Body:".bright_yellow());
    print_truncated(&pretty_body(body));

    println!("{}", "═".repeat(80).bright_green());
    println!();
}

fn print_truncated(text: &str) {
    if text.chars().count() > CONSOLE_BODY_LIMIT {
        println!("{}", safe_truncate(text, CONSOLE_BODY_LIMIT));
        println!("\n{}", format!("... (truncated, total {} bytes)", text.len()).bright_black());
    } else {
        println!("{}", text);
    }
}

/// Pretty-print JSON, fall back to the raw text
fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| body.to_string())
}

/// Writes every request and response to its own text file.
///
/// A response file shares the timestamp and model of the request that
/// preceded it, so `req-<ts>-<model>.txt` pairs with `resp-<ts>-<model>.txt`.
pub struct RequestFileLogger {
    logs_dir: PathBuf,
    last_request: Mutex<Option<(String, String)>>,
}

impl RequestFileLogger {
    pub fn new(logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
            last_request: Mutex::new(None),
        }
    }

    /// Logger writing into ~/.hugchat/logs
    pub fn in_default_dir() -> Result<Self> {
        Ok(Self::new(get_logs_dir()?))
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    fn write_request(&self, url: &str, payload: &ChatPayload, credential: &str) -> Result<PathBuf> {
        let timestamp = Utc::now().format("%Y%m%d-%H%M%S%3f").to_string();
        let model_name = payload.model.replace('/', "-");
        let file_path = self.logs_dir.join(format!("req-{}-{}.txt", timestamp, model_name));

        let mut log_content = String::new();
        log_content.push_str("HTTP REQUEST LOG\n");
        log_content.push_str("================\n\n");
        log_content.push_str(&format!("Timestamp: {}\n", timestamp));
        log_content.push_str(&format!("Model: {}\n", payload.model));
        log_content.push_str(&format!("URL: {}\n\n", url));

        log_content.push_str("Headers:\n");
        log_content.push_str("  Content-Type: application/json\n");
        log_content.push_str(&format!("  Authorization: Bearer {}\n\n", mask_credential(credential)));

        log_content.push_str("Request Body:\n");
        let json = serde_json::to_string_pretty(payload)
            .context("Failed to serialize request for logging")?;
        log_content.push_str(&json);
        log_content.push('\n');

        fs::write(&file_path, log_content)
            .with_context(|| format!("Failed to write request log to {}", file_path.display()))?;

        if let Ok(mut last) = self.last_request.lock() {
            *last = Some((timestamp, model_name));
        }

        Ok(file_path)
    }

    fn write_response(
        &self,
        status: &reqwest::StatusCode,
        headers: &reqwest::header::HeaderMap,
        body: &str,
    ) -> Result<PathBuf> {
        let (timestamp, model_name) = self
            .last_request
            .lock()
            .ok()
            .and_then(|last| last.clone())
            .unwrap_or_else(|| (Utc::now().format("%Y%m%d-%H%M%S%3f").to_string(), "unknown".to_string()));
        let file_path = self.logs_dir.join(format!("resp-{}-{}.txt", timestamp, model_name));

        let mut log_content = String::new();
        log_content.push_str("HTTP RESPONSE LOG\n");
        log_content.push_str("=================\n\n");
        log_content.push_str(&format!("Timestamp: {}\n", timestamp));
        log_content.push_str(&format!("Status: {} {}\n\n",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ));

        log_content.push_str("Headers:\n");
        for (name, value) in headers.iter() {
            if let Ok(val_str) = value.to_str() {
                log_content.push_str(&format!("  {}: {}\n", name.as_str(), val_str));
            }
        }

        log_content.push_str("\nResponse Body:\n");
        log_content.push_str(&pretty_body(body));
        log_content.push('\n');

        log_content.push_str("\n---\n");
        log_content.push_str(&format!("Response Size: {} bytes\n", body.len()));

        fs::write(&file_path, log_content)
            .with_context(|| format!("Failed to write response log to {}", file_path.display()))?;

        Ok(file_path)
    }
}

impl DebugLogger for RequestFileLogger {
    fn event(&self, _message: &str) {}

    fn request(&self, url: &str, payload: &ChatPayload, credential: &str) {
        match self.write_request(url, payload, credential) {
            Ok(path) => println!("{}", format!("📝 Request logged to: {}", path.display()).bright_blue()),
            Err(e) => eprintln!("[Logging error] {:#}", e),
        }
    }

    fn response(
        &self,
        status: &reqwest::StatusCode,
        headers: &reqwest::header::HeaderMap,
        body: &str,
    ) {
        match self.write_response(status, headers, body) {
            Ok(path) => println!("{}", format!("📄 Response logged to: {}", path.display()).bright_blue()),
            Err(e) => eprintln!("[Logging error] {:#}", e),
        }
    }
}
