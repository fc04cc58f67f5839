//! Errors surfaced by the dialogue handlers.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::synthesis::EngineError;
use crate::ports::SessionStoreError;

/// Failure of a dialogue command or query.
#[derive(Debug, Clone, Error)]
pub enum DialogueError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

impl From<ValidationError> for DialogueError {
    fn from(err: ValidationError) -> Self {
        Self::Engine(EngineError::Validation(err))
    }
}
