//! HTTP adapters - REST API implementations.

pub mod dialogue;

// Re-export key types for convenience
pub use dialogue::{app_router, build_workspace, DialogueAppState};
