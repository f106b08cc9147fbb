use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hugchat_chat::{ChatError, ChatSession, ChatTransport, SessionSettings, MAX_TOKENS_CEILING};
use hugchat_llm_api::{ClientConfig, StatusCode};
use hugchat_logging::DebugLogger;
use hugchat_models::{ChatPayload, ChatResponse, Choice, Message, Role, Usage};
use pretty_assertions::assert_eq;

/// Transport double that replays scripted outcomes and records every payload
#[derive(Default)]
struct ScriptedTransport {
    script: Mutex<VecDeque<Result<ChatResponse, ChatError>>>,
    fallback: Option<ChatResponse>,
    payloads: Mutex<Vec<ChatPayload>>,
}

impl ScriptedTransport {
    fn new(script: Vec<Result<ChatResponse, ChatError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        })
    }

    /// Returns the same response forever
    fn repeating(response: ChatResponse) -> Arc<Self> {
        Arc::new(Self {
            fallback: Some(response),
            ..Self::default()
        })
    }

    fn payloads(&self) -> Vec<ChatPayload> {
        self.payloads.lock().unwrap().clone()
    }

    fn budgets(&self) -> Vec<u32> {
        self.payloads().iter().map(|p| p.max_tokens).collect()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn execute(
        &self,
        payload: &ChatPayload,
        _logger: &dyn DebugLogger,
    ) -> Result<ChatResponse, ChatError> {
        self.payloads.lock().unwrap().push(payload.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => Ok(self
                .fallback
                .clone()
                .expect("transport called more often than scripted")),
        }
    }
}

/// Logger that keeps every event line
#[derive(Default)]
struct RecordingLogger {
    events: Mutex<Vec<String>>,
}

impl DebugLogger for RecordingLogger {
    fn event(&self, message: &str) {
        self.events.lock().unwrap().push(message.to_string());
    }
}

fn reply(content: &str, finish_reason: Option<&str>) -> ChatResponse {
    ChatResponse {
        choices: vec![Choice {
            finish_reason: finish_reason.map(str::to_string),
            index: 0,
            message: Message::assistant(content),
        }],
        usage: Usage {
            prompt_tokens: 5,
            completion_tokens: 7,
            total_tokens: 12,
        },
        ..ChatResponse::default()
    }
}

fn settings(max_tokens: u32) -> SessionSettings {
    SessionSettings {
        model: "test-model".to_string(),
        max_tokens,
        temperature: 0.7,
    }
}

fn session_with(transport: &Arc<ScriptedTransport>, max_tokens: u32) -> ChatSession {
    ChatSession::new(transport.clone(), settings(max_tokens))
}

fn unauthorized() -> ChatError {
    ChatError::Remote {
        status: StatusCode::UNAUTHORIZED,
        message: "unauthorized".to_string(),
        response: Box::new(ChatResponse::from_error("unauthorized")),
    }
}

#[tokio::test]
async fn test_success_appends_user_then_assistant() {
    let transport = ScriptedTransport::new(vec![Ok(reply("Hi there", Some("stop")))]);
    let mut session = session_with(&transport, 1024);

    let answer = session.send_message("Hello").await.unwrap();

    assert_eq!(answer, "Hi there");
    assert_eq!(
        session.history(),
        &[Message::user("Hello"), Message::assistant("Hi there")]
    );
    assert_eq!(transport.payloads().len(), 1);
}

#[tokio::test]
async fn test_truncation_doubles_budget_then_succeeds() {
    let transport = ScriptedTransport::new(vec![
        Ok(reply("Hel", Some("length"))),
        Ok(reply("Hello!", Some("stop"))),
    ]);
    let mut session = session_with(&transport, 1024);

    let answer = session.send_message("Hi").await.unwrap();

    assert_eq!(answer, "Hello!");
    assert_eq!(transport.budgets(), vec![1024, 2048]);
    assert_eq!(
        session.history(),
        &[Message::user("Hi"), Message::assistant("Hello!")]
    );
    // The session default is untouched by the retry
    assert_eq!(session.settings().max_tokens, 1024);
}

#[tokio::test]
async fn test_retry_resends_identical_messages() {
    let transport = ScriptedTransport::new(vec![
        Ok(reply("", Some("length"))),
        Ok(reply("done", Some("stop"))),
    ]);
    let mut session = session_with(&transport, 100);

    session.send_message("Hi").await.unwrap();

    let payloads = transport.payloads();
    assert_eq!(payloads[0].messages, payloads[1].messages);
    assert_eq!(payloads[0].model, payloads[1].model);
}

#[tokio::test]
async fn test_persistent_truncation_hits_ceiling() {
    let transport = ScriptedTransport::repeating(reply("partial", Some("length")));
    let mut session = session_with(&transport, 1024);

    let err = session.send_message("Hi").await.unwrap_err();

    match &err {
        ChatError::MaxTokensExceeded { limit, response } => {
            assert_eq!(*limit, MAX_TOKENS_CEILING);
            assert_eq!(response.choices[0].message.content, "partial");
        }
        other => panic!("expected ceiling error, got {:?}", other),
    }
    assert_eq!(err.to_string(), "max tokens exceeded the limit of 8192");
    assert_eq!(transport.budgets(), vec![1024, 2048, 4096, 8192]);
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_missing_finish_reason_counts_as_truncation() {
    let transport = ScriptedTransport::new(vec![
        Ok(reply("maybe", None)),
        Ok(reply("sure", Some("stop"))),
    ]);
    let mut session = session_with(&transport, 512);

    assert_eq!(session.send_message("Hi").await.unwrap(), "sure");
    assert_eq!(transport.budgets(), vec![512, 1024]);
}

#[tokio::test]
async fn test_budget_above_half_ceiling_fails_after_one_call() {
    let transport = ScriptedTransport::repeating(reply("x", Some("length")));
    let mut session = session_with(&transport, 5000);

    let err = session.send_message("Hi").await.unwrap_err();

    assert_eq!(err.kind(), "max_tokens");
    assert_eq!(transport.budgets(), vec![5000]);
}

#[tokio::test]
async fn test_zero_budget_still_grows() {
    let transport = ScriptedTransport::new(vec![
        Ok(reply("", Some("length"))),
        Ok(reply("ok", Some("stop"))),
    ]);
    let mut session = session_with(&transport, 0);

    session.send_message("Hi").await.unwrap();

    assert_eq!(transport.budgets(), vec![0, 2]);
}

#[tokio::test]
async fn test_payload_puts_new_message_before_history() {
    let transport = ScriptedTransport::new(vec![
        Ok(reply("B", Some("stop"))),
        Ok(reply("D", Some("stop"))),
    ]);
    let mut session = session_with(&transport, 1024);

    session.send_message("A").await.unwrap();
    session.send_message("C").await.unwrap();

    let second = &transport.payloads()[1];
    assert_eq!(
        second.messages,
        vec![
            Message::user("C"),
            Message::user("A"),
            Message::assistant("B"),
        ]
    );
    assert_eq!(second.model, "test-model");
    assert_eq!(second.max_tokens, 1024);
}

#[tokio::test]
async fn test_failure_leaves_history_unchanged() {
    let transport = ScriptedTransport::new(vec![
        Ok(reply("first answer", Some("stop"))),
        Err(unauthorized()),
    ]);
    let mut session = session_with(&transport, 1024);

    session.send_message("first").await.unwrap();
    let before = session.history_snapshot();

    let err = session.send_message("second").await.unwrap_err();

    assert!(err.to_string().contains("unauthorized"));
    assert_eq!(session.history(), before.as_slice());
}

#[tokio::test]
async fn test_empty_choices_with_error_text_is_remote() {
    let transport = ScriptedTransport::new(vec![Ok(ChatResponse::from_error("model is loading"))]);
    let mut session = session_with(&transport, 1024);

    let err = session.send_message("Hi").await.unwrap_err();

    match &err {
        ChatError::Remote { message, .. } => assert_eq!(message, "model is loading"),
        other => panic!("expected remote error, got {:?}", other),
    }
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_empty_choices_without_error_is_decoding() {
    let transport = ScriptedTransport::new(vec![Ok(ChatResponse::default())]);
    let mut session = session_with(&transport, 1024);

    let err = session.send_message("Hi").await.unwrap_err();

    assert_eq!(err.kind(), "decoding");
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_clear_history_resets_but_session_keeps_working() {
    let transport = ScriptedTransport::new(vec![
        Ok(reply("one", Some("stop"))),
        Ok(reply("two", Some("stop"))),
    ]);
    let mut session = session_with(&transport, 1024);

    session.send_message("first").await.unwrap();
    session.clear_history();
    assert!(session.history().is_empty());

    session.send_message("second").await.unwrap();
    assert_eq!(transport.payloads()[1].messages, vec![Message::user("second")]);
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn test_snapshot_is_independent_of_later_calls() {
    let transport = ScriptedTransport::new(vec![
        Ok(reply("one", Some("stop"))),
        Ok(reply("two", Some("stop"))),
    ]);
    let mut session = session_with(&transport, 1024);

    session.send_message("first").await.unwrap();
    let snapshot = session.history_snapshot();
    session.send_message("second").await.unwrap();

    assert_eq!(snapshot.len(), 2);
    assert_eq!(session.history().len(), 4);
    assert_eq!(session.history()[3].role, Role::Assistant);
}

#[tokio::test]
async fn test_usage_accumulates_over_retries() {
    let transport = ScriptedTransport::new(vec![
        Ok(reply("", Some("length"))),
        Ok(reply("fine", Some("stop"))),
    ]);
    let mut session = session_with(&transport, 1024);
    assert_eq!(session.last_usage(), None);

    session.send_message("Hi").await.unwrap();

    assert_eq!(session.last_usage().map(|u| u.total_tokens), Some(12));
    assert_eq!(session.total_tokens_used(), 24);
}

#[tokio::test]
async fn test_huge_usage_saturates_instead_of_failing() {
    let mut truncated = reply("", Some("length"));
    truncated.usage.total_tokens = u64::MAX;
    let mut complete = reply("ok", Some("stop"));
    complete.usage.total_tokens = u64::MAX;
    let transport = ScriptedTransport::new(vec![Ok(truncated), Ok(complete)]);
    let mut session = session_with(&transport, 1024);

    assert_eq!(session.send_message("Hi").await.unwrap(), "ok");
    assert_eq!(session.total_tokens_used(), u64::MAX);
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn test_failed_call_does_not_count_usage() {
    let transport = ScriptedTransport::repeating(reply("", Some("length")));
    let mut session = session_with(&transport, 4096);

    session.send_message("Hi").await.unwrap_err();

    assert_eq!(session.last_usage(), None);
    assert_eq!(session.total_tokens_used(), 0);
}

#[tokio::test]
async fn test_logger_receives_retry_event() {
    let transport = ScriptedTransport::new(vec![
        Ok(reply("", Some("length"))),
        Ok(reply("ok", Some("stop"))),
    ]);
    let logger = Arc::new(RecordingLogger::default());
    let mut session = session_with(&transport, 1024);
    session.set_logger(logger.clone());
    assert!(session.debug_enabled());

    session.send_message("Hi").await.unwrap();

    let events = logger.events.lock().unwrap();
    assert!(events.iter().any(|e| e.contains("max_tokens 2048")));
}

#[tokio::test]
async fn test_enable_debugging_toggles_logger() {
    let transport = ScriptedTransport::new(vec![]);
    let mut session = session_with(&transport, 1024);
    assert!(!session.debug_enabled());

    session.enable_debugging(true);
    assert!(session.debug_enabled());

    session.enable_debugging(false);
    assert!(!session.debug_enabled());
}

#[tokio::test]
async fn test_empty_base_url_is_config_error() {
    let config = ClientConfig::new("", "hf_token", "test-model");
    let mut session = ChatSession::from_config(&config).unwrap();

    let err = session.send_message("Hi").await.unwrap_err();

    assert!(matches!(err, ChatError::Config(_)));
    assert!(session.history().is_empty());
}
