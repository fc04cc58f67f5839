//! Session domain module.
//!
//! A dialogue session bundles one conversation with its phase and the
//! question engine's state.

mod dialogue_session;

pub use dialogue_session::DialogueSession;
