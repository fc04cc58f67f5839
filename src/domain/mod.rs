//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (session keys, timestamps, errors)
//! - `conversation` - Turn log, live document, phases and numbered questions
//! - `synthesis` - Document kinds, prompts and JSON extraction/repair
//! - `planning` - Completeness analysis for question-driven dialogues
//! - `session` - Per-session dialogue state

pub mod conversation;
pub mod foundation;
pub mod planning;
pub mod session;
pub mod synthesis;
