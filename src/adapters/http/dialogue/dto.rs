//! HTTP DTOs for dialogue endpoints.
//!
//! These types decouple the HTTP API from domain types. Field names follow the
//! camelCase wire format existing clients expect.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::handlers::{HistoryView, SubmitMessageResult};
use crate::domain::conversation::{DialoguePhase, Turn, TurnRole};
use crate::domain::foundation::SessionKey;
use crate::domain::synthesis::DocumentKind;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST {workspace}/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// A missing field reads as empty and is rejected as blank.
    #[serde(default)]
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response to a chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Assistant text for this turn.
    pub response: String,
    pub document: Option<Value>,
    pub is_initial: bool,
    pub satisfied: bool,
    /// Question text when one was just asked.
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    /// Long-form plan prompt, on the turn that produced the plan.
    pub final_prompt: Option<String>,
    pub session_id: String,
    pub message_count: usize,
}

impl ChatResponse {
    pub fn from_result(session: &SessionKey, result: SubmitMessageResult) -> Self {
        let (question, options) = match result.question {
            Some(round) => (
                Some(round.question().to_string()),
                Some(round.options().to_vec()),
            ),
            None => (None, None),
        };

        Self {
            response: result.reply,
            document: result.document,
            is_initial: result.is_initial,
            satisfied: result.satisfied,
            question,
            options,
            final_prompt: result.final_prompt,
            session_id: session.to_string(),
            message_count: result.message_count,
        }
    }
}

/// One turn in a history response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnView {
    pub role: TurnRole,
    pub content: String,
    /// RFC 3339.
    pub timestamp: String,
}

impl From<&Turn> for TurnView {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role(),
            content: turn.content().to_string(),
            timestamp: turn.timestamp().to_rfc3339(),
        }
    }
}

/// Response to a history query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub conversation_history: Vec<TurnView>,
    pub current_document: Option<Value>,
    pub message_count: usize,
    pub phase: DialoguePhase,
}

impl From<HistoryView> for HistoryResponse {
    fn from(view: HistoryView) -> Self {
        Self {
            conversation_history: view.turns.iter().map(TurnView::from).collect(),
            current_document: view.document,
            message_count: view.message_count,
            phase: view.phase,
        }
    }
}

/// Response to a reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
}

impl ResetResponse {
    pub fn done() -> Self {
        Self {
            message: "Conversation reset successfully".to_string(),
        }
    }
}

/// Endpoints of one workspace, for the service index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceInfo {
    pub kind: DocumentKind,
    pub name: String,
    /// Snake-case name clients file the document under.
    pub document_field: String,
    pub chat: String,
    pub history: String,
    pub reset: String,
}

impl WorkspaceInfo {
    pub fn new(kind: DocumentKind, prefix: &str) -> Self {
        Self {
            kind,
            name: kind.display_name().to_string(),
            document_field: kind.document_field().to_string(),
            chat: format!("POST {}/chat", prefix),
            history: format!("GET {}/history", prefix),
            reset: format!("POST {}/reset", prefix),
        }
    }
}

/// Response of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub workspaces: Vec<WorkspaceInfo>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Error DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn no_active_session(message: impl Into<String>) -> Self {
        Self::new("NO_ACTIVE_SESSION", message)
    }

    pub fn oracle_unavailable(message: impl Into<String>) -> Self {
        Self::new("ORACLE_UNAVAILABLE", message)
    }

    pub fn synthesis_failed(message: impl Into<String>) -> Self {
        Self::new("SYNTHESIS_FAILED", message)
    }

    pub fn invalid_question_format(message: impl Into<String>) -> Self {
        Self::new("INVALID_QUESTION_FORMAT", message)
    }

    pub fn malformed_document(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_DOCUMENT", message)
    }

    pub fn capacity_exceeded(message: impl Into<String>) -> Self {
        Self::new("CAPACITY_EXCEEDED", message)
    }
}
