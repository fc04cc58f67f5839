//! AI Provider Port - Interface for the text-generation oracle.
//!
//! The engine needs exactly one capability from an LLM: turn a prompt into
//! reply text. Providers differ in how that text comes back, so completions
//! carry an [`OracleReply`] that the engine normalizes to a single string.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoProvider;
//!
//! #[async_trait]
//! impl AIProvider for EchoProvider {
//!     async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
//!         Ok(CompletionResponse {
//!             reply: OracleReply::Text(request.prompt),
//!             usage: TokenUsage::zero(),
//!             model: "echo-1".to_string(),
//!             finish_reason: FinishReason::Stop,
//!         })
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("echo", "echo-1", 8_192)
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Port for oracle interactions.
///
/// Implementations connect to an external text-generation service and
/// translate its API into [`CompletionResponse`].
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a single completion for a prompt.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Get provider information (name, model, context size).
    fn provider_info(&self) -> ProviderInfo;
}

/// A single prompt for the oracle.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System instruction and task, already joined.
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, metadata: RequestMetadata) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
            metadata,
        }
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Correlates provider logs with one oracle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMetadata {
    pub trace_id: String,
}

impl RequestMetadata {
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
        }
    }

    /// Fresh random trace id.
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }
}

/// Shape of the text an oracle returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleReply {
    /// A direct text payload.
    Text(String),
    /// Ordered content fragments of a structured reply.
    Fragments(Vec<String>),
    /// Nothing usable.
    Empty,
}

impl OracleReply {
    /// Normalizes the reply to one string.
    ///
    /// Direct text is trimmed, fragments are joined with a single space, and
    /// an empty reply becomes the empty string.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Fragments(parts) => parts.join(" "),
            Self::Empty => String::new(),
        }
    }
}

/// One oracle completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub reply: OracleReply,
    pub usage: TokenUsage,
    /// Model that actually served the call.
    pub model: String,
    pub finish_reason: FinishReason,
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    /// Output was cut at the token limit; the JSON is likely truncated.
    Length,
    ContentFilter,
    Other,
}

/// Identity of the configured oracle, for logs and the service index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub model: String,
    pub max_context_tokens: u32,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>, max_context_tokens: u32) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            max_context_tokens,
        }
    }
}

/// Failures reported by an oracle provider.
///
/// The engine folds every variant into `OracleUnavailable`; the distinction
/// matters to the transport retry loop and to logs.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a body we could not decode.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Whether the transport may try the same request again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}
