//! Session Store Port - Keyed, lock-protected dialogue sessions.
//!
//! Each session is shared behind its own async mutex. Callers hold the lock
//! for the whole of a read-modify-write step, oracle calls included, so
//! requests against one session are serialized while different sessions run
//! in parallel.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionKey;
use crate::domain::session::DialogueSession;

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<DialogueSession>>;

/// Errors that can occur during session store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session capacity reached ({0} sessions)")]
    CapacityExceeded(usize),
}

/// Port for looking up dialogue sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session for `key`, creating an empty one on first use.
    ///
    /// A full store first evicts sessions that are empty and unreferenced.
    ///
    /// # Errors
    /// Returns `SessionStoreError::CapacityExceeded` if a new session would
    /// exceed the store's limit
    async fn checkout(&self, key: &SessionKey) -> Result<SessionHandle, SessionStoreError>;

    /// Drops the session for `key` if it is empty and no caller holds it.
    ///
    /// Returns true when an entry was removed.
    async fn release(&self, key: &SessionKey) -> bool;

    /// Returns the session for `key` without creating it.
    async fn find(&self, key: &SessionKey) -> Option<SessionHandle>;

    /// Number of sessions currently held.
    async fn session_count(&self) -> usize;
}
