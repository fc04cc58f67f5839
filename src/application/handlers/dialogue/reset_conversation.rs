//! ResetConversationHandler - clears a session and frees its slot.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::SessionKey;
use crate::ports::SessionStore;

/// Command to reset a session.
#[derive(Debug, Clone)]
pub struct ResetConversationCommand {
    pub session: SessionKey,
}

/// Handler for resets. Always succeeds; resetting an unknown or already empty
/// session is a no-op.
pub struct ResetConversationHandler {
    store: Arc<dyn SessionStore>,
}

impl ResetConversationHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: ResetConversationCommand) {
        if let Some(handle) = self.store.find(&cmd.session).await {
            handle.lock().await.reset();
        }
        let released = self.store.release(&cmd.session).await;
        info!(session = %cmd.session, released, "Conversation reset");
    }
}
