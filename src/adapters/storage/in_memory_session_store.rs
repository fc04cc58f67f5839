//! In-Memory Session Store Adapter
//!
//! Keeps dialogue sessions for the lifetime of the process. Nothing survives
//! a restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::SessionKey;
use crate::domain::session::DialogueSession;
use crate::ports::{SessionHandle, SessionStore, SessionStoreError};

/// In-memory map of session keys to lock-protected sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionKey, SessionHandle>>>,
    max_sessions: usize,
}

impl InMemorySessionStore {
    /// Create a store holding at most `max_sessions` sessions
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(1024)
    }
}

/// Empty and held by nobody but the map.
///
/// Handles only leave the map under its lock, so a count of one cannot rise
/// while the caller holds the write lock.
fn is_idle(handle: &SessionHandle) -> bool {
    Arc::strong_count(handle) == 1
        && handle
            .try_lock()
            .map(|session| session.is_pristine())
            .unwrap_or(false)
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn checkout(&self, key: &SessionKey) -> Result<SessionHandle, SessionStoreError> {
        if let Some(handle) = self.sessions.read().await.get(key) {
            return Ok(Arc::clone(handle));
        }

        let mut sessions = self.sessions.write().await;
        // Another request may have created it between the two locks.
        if let Some(handle) = sessions.get(key) {
            return Ok(Arc::clone(handle));
        }
        if sessions.len() >= self.max_sessions {
            let before = sessions.len();
            sessions.retain(|_, handle| !is_idle(handle));
            tracing::debug!(evicted = before - sessions.len(), "evicted idle sessions");
        }
        if sessions.len() >= self.max_sessions {
            return Err(SessionStoreError::CapacityExceeded(self.max_sessions));
        }

        let handle = Arc::new(Mutex::new(DialogueSession::new()));
        sessions.insert(key.clone(), Arc::clone(&handle));
        tracing::debug!(session = %key, "created dialogue session");
        Ok(handle)
    }

    async fn release(&self, key: &SessionKey) -> bool {
        let mut sessions = self.sessions.write().await;
        if !sessions.get(key).is_some_and(is_idle) {
            return false;
        }
        sessions.remove(key);
        tracing::debug!(session = %key, "released dialogue session");
        true
    }

    async fn find(&self, key: &SessionKey) -> Option<SessionHandle> {
        self.sessions.read().await.get(key).cloned()
    }

    async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> SessionKey {
        SessionKey::new(s).unwrap()
    }

    #[tokio::test]
    async fn checkout_creates_empty_session() {
        let store = InMemorySessionStore::default();
        let handle = store.checkout(&key("a")).await.unwrap();

        assert!(handle.lock().await.conversation().is_empty());
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn checkout_returns_same_session_for_same_key() {
        let store = InMemorySessionStore::default();
        let first = store.checkout(&key("a")).await.unwrap();
        first.lock().await.conversation_mut().push_user("hello");

        let second = store.checkout(&key("a")).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.lock().await.conversation().len(), 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated_by_key() {
        let store = InMemorySessionStore::default();
        store
            .checkout(&key("a"))
            .await
            .unwrap()
            .lock()
            .await
            .conversation_mut()
            .push_user("hello");

        let other = store.checkout(&key("b")).await.unwrap();
        assert!(other.lock().await.conversation().is_empty());
    }

    #[tokio::test]
    async fn find_does_not_create() {
        let store = InMemorySessionStore::default();
        assert!(store.find(&key("missing")).await.is_none());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn capacity_limits_new_sessions_only() {
        let store = InMemorySessionStore::new(1);
        let held = store.checkout(&key("a")).await.unwrap();

        assert_eq!(
            store.checkout(&key("b")).await.unwrap_err(),
            SessionStoreError::CapacityExceeded(1)
        );
        assert!(Arc::ptr_eq(&held, &store.checkout(&key("a")).await.unwrap()));
    }

    #[tokio::test]
    async fn full_store_evicts_empty_unheld_sessions() {
        let store = InMemorySessionStore::new(2);
        store.checkout(&key("a")).await.unwrap();
        let busy = store.checkout(&key("b")).await.unwrap();
        busy.lock().await.conversation_mut().push_user("idea");
        drop(busy);

        assert!(store.checkout(&key("c")).await.is_ok());
        assert!(store.find(&key("a")).await.is_none());
        assert!(store.find(&key("b")).await.is_some());
        assert_eq!(store.session_count().await, 2);
    }

    #[tokio::test]
    async fn release_removes_only_idle_sessions() {
        let store = InMemorySessionStore::default();
        let held = store.checkout(&key("a")).await.unwrap();
        assert!(!store.release(&key("a")).await);

        held.lock().await.conversation_mut().push_user("idea");
        drop(held);
        assert!(!store.release(&key("a")).await);

        store.checkout(&key("a")).await.unwrap().lock().await.reset();
        assert!(store.release(&key("a")).await);
        assert_eq!(store.session_count().await, 0);
        assert!(!store.release(&key("missing")).await);
    }
}
