//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - The text-generation oracle
//! - `SessionStore` - Keyed, lock-protected dialogue sessions

mod ai_provider;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, OracleReply,
    ProviderInfo, RequestMetadata, TokenUsage,
};
pub use session_store::{SessionHandle, SessionStore, SessionStoreError};
