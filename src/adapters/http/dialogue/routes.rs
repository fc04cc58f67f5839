//! Axum routes for dialogue endpoints.
//!
//! Every workspace exposes the same three endpoints under `/api/{slug}`.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::storage::InMemorySessionStore;
use crate::application::engine::{DocumentSynthesizer, OracleClient, QuestionEngine, QuestionSettings};
use crate::application::handlers::{GetHistoryHandler, ResetConversationHandler, SubmitMessageHandler};
use crate::config::{CorsPolicy, EngineConfig, ServerConfig};
use crate::domain::synthesis::DocumentKind;
use crate::ports::SessionStore;

use super::dto::{HealthResponse, ServiceInfo, WorkspaceInfo};
use super::handlers::{chat, history, reset, DialogueAppState, SESSION_HEADER};

/// Creates routes for one workspace.
///
/// REST Endpoints:
/// - POST /chat - Submit a message
/// - GET /history - Turns, document and phase
/// - POST /reset - Clear the session
pub fn dialogue_routes() -> Router<DialogueAppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/history", get(history))
        .route("/reset", post(reset))
}

/// Path prefix for a workspace.
pub fn workspace_prefix(kind: DocumentKind) -> String {
    format!("/api/{}", kind.slug())
}

/// Wires a workspace: its own session store, engine and handlers.
pub fn build_workspace(
    kind: DocumentKind,
    oracle: OracleClient,
    engine: &EngineConfig,
) -> DialogueAppState {
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(engine.max_sessions));
    let synthesizer = DocumentSynthesizer::new(oracle, engine.max_synthesis_attempts);
    let questions = QuestionEngine::new(
        synthesizer.clone(),
        QuestionSettings {
            max_questions: engine.max_questions(),
            vocabulary: engine.vocabulary(),
            min_options: engine.min_options,
            max_options: engine.max_options,
        },
    );

    DialogueAppState::new(
        SubmitMessageHandler::new(
            kind,
            store.clone(),
            synthesizer,
            questions,
            engine.history_window,
        ),
        GetHistoryHandler::new(store.clone()),
        ResetConversationHandler::new(store),
    )
}

/// Builds the whole service: every workspace, the index and health routes,
/// and the HTTP middleware stack.
pub fn app_router(workspaces: Vec<DialogueAppState>, server: &ServerConfig) -> Router {
    let info = ServiceInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        workspaces: workspaces
            .iter()
            .map(|w| WorkspaceInfo::new(w.kind, &workspace_prefix(w.kind)))
            .collect(),
    };

    let mut router = Router::new()
        .route(
            "/",
            get(move || {
                let info = info.clone();
                async move { Json(info) }
            }),
        )
        .route(
            "/health",
            get(|| async {
                Json(HealthResponse {
                    status: "ok".to_string(),
                })
            }),
        );

    for workspace in workspaces {
        let prefix = workspace_prefix(workspace.kind);
        router = router.nest(&prefix, dialogue_routes().with_state(workspace));
    }

    router
        .layer(cors_layer(server))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    match server.cors_policy() {
        CorsPolicy::Permissive => CorsLayer::permissive(),
        CorsPolicy::SameOrigin => CorsLayer::new(),
        CorsPolicy::AllowList(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    HeaderName::from_static(SESSION_HEADER),
                ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    fn oracle(mock: MockAIProvider) -> OracleClient {
        OracleClient::new(Arc::new(mock), Duration::from_secs(5))
    }

    fn all_workspaces(mock: MockAIProvider) -> Vec<DialogueAppState> {
        let engine = EngineConfig::default();
        DocumentKind::ALL
            .into_iter()
            .map(|kind| build_workspace(kind, oracle(mock.clone()), &engine))
            .collect()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn dialogue_routes_creates_valid_router() {
        let _routes = dialogue_routes();
    }

    #[test]
    fn prefix_uses_slug() {
        assert_eq!(
            workspace_prefix(DocumentKind::BusinessPlan),
            "/api/business-plan"
        );
    }

    #[test]
    fn build_workspace_keeps_kind() {
        let state = build_workspace(
            DocumentKind::ProjectPlan,
            oracle(MockAIProvider::new()),
            &EngineConfig::default(),
        );
        assert_eq!(state.kind, DocumentKind::ProjectPlan);
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = app_router(all_workspaces(MockAIProvider::new()), &ServerConfig::default());

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn index_lists_every_workspace() {
        let app = app_router(all_workspaces(MockAIProvider::new()), &ServerConfig::default());

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "plan-weaver");
        assert_eq!(body["workspaces"].as_array().unwrap().len(), 5);
        assert_eq!(
            body["workspaces"][4]["chat"],
            "POST /api/business-plan/chat"
        );
        assert_eq!(body["workspaces"][4]["documentField"], "business_plan");
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let app = app_router(all_workspaces(MockAIProvider::new()), &ServerConfig::default());

        let response = app
            .oneshot(
                Request::get("/api/project-plan/history")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn unknown_workspace_is_404() {
        let app = app_router(all_workspaces(MockAIProvider::new()), &ServerConfig::default());

        let response = app
            .oneshot(
                Request::post("/api/marketing-plan/chat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
