//! HTTP adapter for the dialogue workspaces.
//!
//! Exposes chat, history and reset endpoints for each document kind.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, HistoryResponse, ResetResponse,
    ServiceInfo, TurnView, WorkspaceInfo,
};
pub use handlers::{DialogueApiError, DialogueAppState, SESSION_HEADER};
pub use routes::{app_router, build_workspace, dialogue_routes, workspace_prefix};
