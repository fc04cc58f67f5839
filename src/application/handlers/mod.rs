//! Command and query handlers.

pub mod dialogue;

pub use dialogue::{
    DialogueError, GetHistoryHandler, GetHistoryQuery, HistoryView, ResetConversationCommand,
    ResetConversationHandler, SubmitMessageCommand, SubmitMessageHandler, SubmitMessageResult,
};
