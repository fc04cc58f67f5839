//! HTTP handlers for dialogue endpoints.
//!
//! These handlers connect Axum routes to the dialogue command and query
//! handlers of one workspace.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;

use crate::application::handlers::{
    DialogueError, GetHistoryHandler, GetHistoryQuery, ResetConversationCommand,
    ResetConversationHandler, SubmitMessageCommand, SubmitMessageHandler,
};
use crate::domain::foundation::SessionKey;
use crate::domain::synthesis::{DocumentKind, EngineError};
use crate::ports::SessionStoreError;

use super::dto::{ChatRequest, ChatResponse, ErrorResponse, HistoryResponse, ResetResponse};

/// Header naming the session a request belongs to.
pub const SESSION_HEADER: &str = "x-session-id";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for one workspace's dialogue handlers.
#[derive(Clone)]
pub struct DialogueAppState {
    pub kind: DocumentKind,
    pub submit: Arc<SubmitMessageHandler>,
    pub history: Arc<GetHistoryHandler>,
    pub reset: Arc<ResetConversationHandler>,
}

impl DialogueAppState {
    pub fn new(
        submit: SubmitMessageHandler,
        history: GetHistoryHandler,
        reset: ResetConversationHandler,
    ) -> Self {
        Self {
            kind: submit.kind(),
            submit: Arc::new(submit),
            history: Arc::new(history),
            reset: Arc::new(reset),
        }
    }
}

/// Reads the session key header, defaulting when absent.
fn session_key(headers: &HeaderMap) -> Result<SessionKey, DialogueApiError> {
    match headers.get(SESSION_HEADER) {
        None => Ok(SessionKey::default()),
        Some(value) => {
            let raw = value.to_str().map_err(|_| {
                DialogueApiError::BadRequest(format!("{} must be visible ASCII", SESSION_HEADER))
            })?;
            SessionKey::new(raw).map_err(|e| DialogueApiError::BadRequest(e.to_string()))
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST {workspace}/chat
// ════════════════════════════════════════════════════════════════════════════════

/// POST {workspace}/chat - Submit a message.
///
/// # Errors
/// - 400 Bad Request: blank message, bad body or bad session header
/// - 409 Conflict: nothing to update in this session
/// - 502 Bad Gateway: the oracle's output was unusable
/// - 503 Service Unavailable: oracle unreachable or session capacity reached
pub async fn chat(
    State(state): State<DialogueAppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, DialogueApiError> {
    let session = session_key(&headers)?;
    let Json(request) = payload.map_err(|e| DialogueApiError::BadRequest(e.body_text()))?;

    let result = state
        .submit
        .handle(SubmitMessageCommand::new(session.clone(), request.message))
        .await?;

    Ok((StatusCode::OK, Json(ChatResponse::from_result(&session, result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// GET {workspace}/history
// ════════════════════════════════════════════════════════════════════════════════

/// GET {workspace}/history - Turns, document and phase of a session.
///
/// A session that never received a message reads as empty.
pub async fn history(
    State(state): State<DialogueAppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, DialogueApiError> {
    let session = session_key(&headers)?;
    let view = state.history.handle(GetHistoryQuery { session }).await;
    Ok((StatusCode::OK, Json(HistoryResponse::from(view))))
}

// ════════════════════════════════════════════════════════════════════════════════
// POST {workspace}/reset
// ════════════════════════════════════════════════════════════════════════════════

/// POST {workspace}/reset - Clear a session. Idempotent.
pub async fn reset(
    State(state): State<DialogueAppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, DialogueApiError> {
    let session = session_key(&headers)?;
    state.reset.handle(ResetConversationCommand { session }).await;
    Ok((StatusCode::OK, Json(ResetResponse::done())))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type for dialogue endpoints.
#[derive(Debug)]
pub enum DialogueApiError {
    BadRequest(String),
    Dialogue(DialogueError),
}

impl From<DialogueError> for DialogueApiError {
    fn from(err: DialogueError) -> Self {
        Self::Dialogue(err)
    }
}

impl IntoResponse for DialogueApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            DialogueApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            DialogueApiError::Dialogue(DialogueError::Store(err)) => match err {
                SessionStoreError::CapacityExceeded(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::capacity_exceeded(err.to_string()),
                ),
            },
            DialogueApiError::Dialogue(DialogueError::Engine(err)) => engine_error_response(err),
        };

        (status, Json(error)).into_response()
    }
}

fn engine_error_response(err: EngineError) -> (StatusCode, ErrorResponse) {
    let message = err.to_string();
    match err {
        EngineError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(message)),
        EngineError::NoActiveSession(_) => (
            StatusCode::CONFLICT,
            ErrorResponse::no_active_session(message),
        ),
        EngineError::OracleUnavailable(_) => {
            tracing::error!("Oracle unavailable: {}", message);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::oracle_unavailable(message),
            )
        }
        EngineError::SynthesisFailed { attempts, .. } => {
            tracing::error!("Synthesis failed: {}", message);
            (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::synthesis_failed(message).with_details(json!({ "attempts": attempts })),
            )
        }
        EngineError::InvalidQuestionFormat(_) => {
            tracing::error!("Invalid question format: {}", message);
            (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::invalid_question_format(message),
            )
        }
        EngineError::MalformedDocument | EngineError::JsonParseError(_) => {
            tracing::error!("Unusable oracle document: {}", message);
            (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::malformed_document(message),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use axum::response::Response;

    fn status_of(err: DialogueApiError) -> StatusCode {
        let response: Response = err.into_response();
        response.status()
    }

    fn engine(err: EngineError) -> DialogueApiError {
        DialogueApiError::Dialogue(DialogueError::Engine(err))
    }

    mod session_header {
        use super::*;

        #[test]
        fn absent_header_is_default_session() {
            let key = session_key(&HeaderMap::new()).unwrap();
            assert_eq!(key, SessionKey::default());
        }

        #[test]
        fn valid_header_is_used() {
            let mut headers = HeaderMap::new();
            headers.insert(SESSION_HEADER, HeaderValue::from_static("team-7"));

            assert_eq!(session_key(&headers).unwrap().as_str(), "team-7");
        }

        #[test]
        fn invalid_header_is_bad_request() {
            let mut headers = HeaderMap::new();
            headers.insert(SESSION_HEADER, HeaderValue::from_static("has space"));

            let err = session_key(&headers).unwrap_err();
            assert!(matches!(err, DialogueApiError::BadRequest(_)));
        }
    }

    mod error_mapping {
        use super::*;
        use crate::domain::foundation::ValidationError;

        #[test]
        fn validation_is_400() {
            assert_eq!(
                status_of(engine(EngineError::Validation(ValidationError::empty_field(
                    "message"
                )))),
                StatusCode::BAD_REQUEST
            );
        }

        #[test]
        fn no_active_session_is_409() {
            assert_eq!(
                status_of(engine(EngineError::no_active_session("none"))),
                StatusCode::CONFLICT
            );
        }

        #[test]
        fn oracle_unavailable_is_503() {
            assert_eq!(
                status_of(engine(EngineError::oracle_unavailable("down"))),
                StatusCode::SERVICE_UNAVAILABLE
            );
        }

        #[test]
        fn synthesis_failed_is_502() {
            assert_eq!(
                status_of(engine(EngineError::SynthesisFailed {
                    attempts: 3,
                    last_error: "bad".to_string(),
                })),
                StatusCode::BAD_GATEWAY
            );
        }

        #[test]
        fn invalid_question_is_502() {
            assert_eq!(
                status_of(engine(EngineError::invalid_question("none"))),
                StatusCode::BAD_GATEWAY
            );
        }

        #[test]
        fn capacity_is_503() {
            let err = DialogueApiError::Dialogue(DialogueError::Store(
                SessionStoreError::CapacityExceeded(1),
            ));
            assert_eq!(status_of(err), StatusCode::SERVICE_UNAVAILABLE);
        }
    }
}
