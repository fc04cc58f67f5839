//! GetHistoryHandler - read-only view of a session.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::conversation::{DialoguePhase, Turn};
use crate::domain::foundation::SessionKey;
use crate::ports::SessionStore;

/// Query for a session's history.
#[derive(Debug, Clone)]
pub struct GetHistoryQuery {
    pub session: SessionKey,
}

/// Snapshot of a session at the time of the query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryView {
    pub turns: Vec<Turn>,
    pub document: Option<Value>,
    pub message_count: usize,
    pub phase: DialoguePhase,
}

/// Handler for history queries.
///
/// Unknown sessions read as empty and are not created.
pub struct GetHistoryHandler {
    store: Arc<dyn SessionStore>,
}

impl GetHistoryHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetHistoryQuery) -> HistoryView {
        let Some(handle) = self.store.find(&query.session).await else {
            return HistoryView::default();
        };

        let session = handle.lock().await;
        let conversation = session.conversation();
        HistoryView {
            turns: conversation.turns().to_vec(),
            document: conversation.document().cloned(),
            message_count: conversation.len(),
            phase: session.phase(),
        }
    }
}
