//! Turns - single entries of the dialogue log.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The person describing their project.
    User,
    /// The engine's reply.
    Assistant,
}

impl TurnRole {
    /// Capitalized label used when replaying turns into prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

/// One message in the conversation log.
///
/// Content is fixed once appended. The only exception is the numbered-option
/// rewrite, which goes through [`Conversation::rewrite_last_user_turn`].
///
/// [`Conversation::rewrite_last_user_turn`]: super::Conversation::rewrite_last_user_turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: TurnRole,
    content: String,
    timestamp: Timestamp,
}

impl Turn {
    /// Creates a turn stamped with the current time.
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Timestamp::now(),
        }
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Renders the turn as a `Role: content` line.
    pub fn render(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }

    pub(super) fn set_content(&mut self, content: String) {
        self.content = content;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TurnRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&TurnRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn render_uses_capitalized_role() {
        assert_eq!(Turn::user("hello").render(), "User: hello");
        assert_eq!(Turn::assistant("hi").render(), "Assistant: hi");
    }

    #[test]
    fn turn_serializes_with_timestamp() {
        let turn = Turn::user("hello");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
        assert!(json["timestamp"].is_string());
    }
}
