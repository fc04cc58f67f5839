//! OracleClient - the single `invoke(prompt) -> text` capability.
//!
//! Wraps an [`AIProvider`] with the engine's call timeout and reduces every
//! reply shape to one string. The client never retries; repair retries are
//! the synthesizer's policy.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::synthesis::EngineError;
use crate::ports::{AIProvider, CompletionRequest, FinishReason, ProviderInfo, RequestMetadata};

/// Timeout-bounded access to the configured oracle.
#[derive(Clone)]
pub struct OracleClient {
    provider: Arc<dyn AIProvider>,
    timeout: Duration,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OracleClient {
    pub fn new(provider: Arc<dyn AIProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Sets the sampling temperature sent with every call.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Caps the output tokens of every call.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn provider_info(&self) -> ProviderInfo {
        self.provider.provider_info()
    }

    /// Sends `prompt` and returns the normalized reply text.
    ///
    /// An empty string means the oracle produced nothing usable; callers
    /// decide whether that is an error.
    ///
    /// # Errors
    ///
    /// `OracleUnavailable` when the provider fails or the call outlives the
    /// configured timeout.
    pub async fn invoke(&self, prompt: &str) -> Result<String, EngineError> {
        let metadata = RequestMetadata::generate();
        let trace_id = metadata.trace_id.clone();

        let mut request = CompletionRequest::new(prompt, metadata);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        debug!(%trace_id, prompt_chars = prompt.len(), "Invoking oracle");

        let response = timeout(self.timeout, self.provider.complete(request))
            .await
            .map_err(|_| {
                EngineError::oracle_unavailable(format!(
                    "oracle did not answer within {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| EngineError::oracle_unavailable(e.to_string()))?;

        if response.finish_reason == FinishReason::Length {
            warn!(%trace_id, model = %response.model, "Oracle output hit the token limit");
        }
        let text = response.reply.into_text();
        debug!(
            %trace_id,
            reply_chars = text.len(),
            model = %response.model,
            tokens = response.usage.total_tokens,
            "Oracle replied"
        );
        Ok(text)
    }
}

impl std::fmt::Debug for OracleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleClient")
            .field("provider", &self.provider.provider_info().name)
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::ports::OracleReply;

    fn client(provider: MockAIProvider) -> OracleClient {
        OracleClient::new(Arc::new(provider), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn returns_trimmed_text() {
        let oracle = client(MockAIProvider::new().with_response("  hello\n"));
        assert_eq!(oracle.invoke("hi").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn joins_fragments_with_single_space() {
        let oracle = client(
            MockAIProvider::new()
                .with_reply(OracleReply::Fragments(vec!["a".into(), "b".into()])),
        );
        assert_eq!(oracle.invoke("hi").await.unwrap(), "a b");
    }

    #[tokio::test]
    async fn empty_reply_is_empty_string() {
        let oracle = client(MockAIProvider::new().with_reply(OracleReply::Empty));
        assert_eq!(oracle.invoke("hi").await.unwrap(), "");
    }

    #[tokio::test]
    async fn provider_error_is_oracle_unavailable() {
        let oracle = client(MockAIProvider::new().with_error(MockError::Unavailable {
            message: "overloaded".to_string(),
        }));

        let err = oracle.invoke("hi").await.unwrap_err();
        assert!(matches!(err, EngineError::OracleUnavailable(ref m) if m.contains("overloaded")));
    }

    #[tokio::test]
    async fn slow_oracle_times_out() {
        let provider = MockAIProvider::new()
            .with_response("late")
            .with_delay(Duration::from_millis(200));
        let oracle = OracleClient::new(Arc::new(provider), Duration::from_millis(20));

        let err = oracle.invoke("hi").await.unwrap_err();
        assert!(matches!(err, EngineError::OracleUnavailable(_)));
    }

    #[tokio::test]
    async fn sends_prompt_temperature_and_token_cap() {
        let provider = MockAIProvider::new();
        let oracle = OracleClient::new(Arc::new(provider.clone()), Duration::from_secs(5))
            .with_temperature(Some(0.3))
            .with_max_tokens(Some(2048));

        oracle.invoke("the prompt").await.unwrap();

        let calls = provider.requests();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].prompt, "the prompt");
        assert_eq!(calls[0].temperature, Some(0.3));
        assert_eq!(calls[0].max_tokens, Some(2048));
    }
}
