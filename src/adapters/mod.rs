//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the engine to external systems:
//! - `ai` - Oracle providers (Gemini, OpenAI, mock)
//! - `http` - Axum routes for the dialogue workspaces
//! - `storage` - Session stores

pub mod ai;
pub mod http;
pub mod storage;

pub use ai::{GeminiConfig, GeminiProvider, MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use storage::InMemorySessionStore;
