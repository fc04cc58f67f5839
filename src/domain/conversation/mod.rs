//! Conversation domain module.
//!
//! The turn log, the live document, dialogue phases and the numbered-option
//! question protocol.

mod conversation;
mod phase;
mod question;
mod turn;

pub use conversation::Conversation;
pub use phase::DialoguePhase;
pub use question::{
    parse_numbered_options, resolve_selection, QuestionRound, MAX_OPTIONS, MIN_OPTIONS,
};
pub use turn::{Turn, TurnRole};
