//! Application layer - engine services and handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (submit, reset) and the history query each have their own handler.

pub mod engine;
pub mod handlers;

pub use engine::{
    DocumentSynthesizer, Instruction, OracleClient, QuestionEngine, QuestionSettings,
    QuestionStep, Synthesized,
};
pub use handlers::{
    DialogueError, GetHistoryHandler, GetHistoryQuery, HistoryView, ResetConversationCommand,
    ResetConversationHandler, SubmitMessageCommand, SubmitMessageHandler, SubmitMessageResult,
};
