//! Scripted oracle for tests.
//!
//! Replies are played back in the order they were queued; once the queue is
//! empty every call gets the fallback. Every request is recorded so tests can
//! assert on the exact prompts the engine produced.
//!
//! ```ignore
//! let oracle = MockAIProvider::new()
//!     .with_response("not json")
//!     .with_response(r#"PROJECT_PLAN: {"name": "Courier"} MESSAGE: Fixed."#);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, OracleReply,
    ProviderInfo, TokenUsage,
};

/// In-process [`AIProvider`] that plays back a script.
///
/// Clones share the script and the request log.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    script: Arc<Mutex<Script>>,
    delay: Duration,
}

#[derive(Debug)]
struct Script {
    queued: VecDeque<ScriptedReply>,
    fallback: ScriptedReply,
    requests: Vec<CompletionRequest>,
}

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Reply(OracleReply),
    Fail(MockError),
}

/// Provider failures a script can inject.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u64 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::ContentFiltered { reason } => AIError::content_filtered(reason),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

const DEFAULT_FALLBACK: &str = "Mock response";

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                queued: VecDeque::new(),
                fallback: ScriptedReply::Reply(OracleReply::Text(DEFAULT_FALLBACK.to_string())),
                requests: Vec::new(),
            })),
            delay: Duration::ZERO,
        }
    }

    /// Queues a plain text reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.with_reply(OracleReply::Text(content.into()))
    }

    /// Queues a reply of any shape.
    pub fn with_reply(self, reply: OracleReply) -> Self {
        self.script().queued.push_back(ScriptedReply::Reply(reply));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: MockError) -> Self {
        self.script().queued.push_back(ScriptedReply::Fail(error));
        self
    }

    pub fn with_fallback_response(self, content: impl Into<String>) -> Self {
        self.script().fallback = ScriptedReply::Reply(OracleReply::Text(content.into()));
        self
    }

    pub fn with_fallback_error(self, error: MockError) -> Self {
        self.script().fallback = ScriptedReply::Fail(error);
        self
    }

    /// Latency added to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.script().requests.len()
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.script().requests.clone()
    }

    /// Just the prompts of [`Self::requests`].
    pub fn prompts(&self) -> Vec<String> {
        self.script()
            .requests
            .iter()
            .map(|r| r.prompt.clone())
            .collect()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records the request and pops the next scripted outcome.
    fn play(&self, request: CompletionRequest) -> ScriptedReply {
        let mut script = self.script();
        script.requests.push(request);
        match script.queued.pop_front() {
            Some(next) => next,
            None => script.fallback.clone(),
        }
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let outcome = self.play(request);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match outcome {
            ScriptedReply::Reply(reply) => Ok(CompletionResponse {
                reply,
                usage: TokenUsage::new(10, 20),
                model: "mock-model-1".to_string(),
                finish_reason: FinishReason::Stop,
            }),
            ScriptedReply::Fail(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model-1", 128_000)
    }
}
