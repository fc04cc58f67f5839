//! Error types for document synthesis

use crate::domain::foundation::ValidationError;

/// Failures while recovering a JSON document from oracle text.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// The reply held no `{ ... }` span at all.
    #[error("oracle reply contained no JSON object")]
    MalformedDocument,

    /// A span was found but did not parse, even after repair.
    #[error("JSON parse error: {message}")]
    JsonParseError {
        /// Parser diagnostic.
        message: String,
        /// The span that failed to parse, fed back to the oracle for repair.
        candidate: String,
    },
}

/// Errors surfaced by the synthesis engine to its callers.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("oracle reply contained no JSON object")]
    MalformedDocument,

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("invalid question format: {0}")]
    InvalidQuestionFormat(String),

    #[error("no active session: {0}")]
    NoActiveSession(String),

    #[error("synthesis failed after {attempts} attempts: {last_error}")]
    SynthesisFailed { attempts: u32, last_error: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl EngineError {
    pub fn oracle_unavailable(message: impl Into<String>) -> Self {
        Self::OracleUnavailable(message.into())
    }

    pub fn invalid_question(message: impl Into<String>) -> Self {
        Self::InvalidQuestionFormat(message.into())
    }

    pub fn no_active_session(message: impl Into<String>) -> Self {
        Self::NoActiveSession(message.into())
    }
}

impl From<ExtractionError> for EngineError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::MalformedDocument => Self::MalformedDocument,
            ExtractionError::JsonParseError { message, .. } => Self::JsonParseError(message),
        }
    }
}
