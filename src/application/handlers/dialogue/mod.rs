//! Dialogue command and query handlers.

mod error;
mod get_history;
mod reset_conversation;
mod submit_message;

pub use error::DialogueError;
pub use get_history::{GetHistoryHandler, GetHistoryQuery, HistoryView};
pub use reset_conversation::{ResetConversationCommand, ResetConversationHandler};
pub use submit_message::{SubmitMessageCommand, SubmitMessageHandler, SubmitMessageResult};
