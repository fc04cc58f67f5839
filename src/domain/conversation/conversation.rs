//! Conversation - ordered turn log plus the current document.

use serde::Serialize;
use serde_json::Value;

use super::turn::{Turn, TurnRole};

/// Ordered dialogue log and the single live document it produced.
///
/// Turns grow by one user turn and one assistant turn per successful step.
/// The document is absent until the first successful synthesis and is only
/// ever replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conversation {
    turns: Vec<Turn>,
    document: Option<Value>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// Appends a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    /// Appends an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// The assistant turn that directly precedes the latest user turn.
    pub fn previous_assistant_turn(&self) -> Option<&Turn> {
        match self.turns.as_slice() {
            [.., prev, last]
                if last.role() == TurnRole::User && prev.role() == TurnRole::Assistant =>
            {
                Some(prev)
            }
            _ => None,
        }
    }

    /// Rewrites the content of the latest turn if it is a user turn.
    ///
    /// Returns false and leaves the log untouched otherwise.
    pub fn rewrite_last_user_turn(&mut self, content: impl Into<String>) -> bool {
        match self.turns.last_mut() {
            Some(turn) if turn.role() == TurnRole::User => {
                turn.set_content(content.into());
                true
            }
            _ => false,
        }
    }

    /// Replaces the document wholesale.
    pub fn replace_document(&mut self, document: Value) {
        self.document = Some(document);
    }

    /// Renders every turn as `Role: content` lines.
    pub fn render_all(&self) -> String {
        render_lines(&self.turns)
    }
}

fn render_lines(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(Turn::render)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Conversation {
        let mut conversation = Conversation::new();
        conversation.push_user("Mobile app for food delivery");
        conversation.push_assistant("Here is your plan.");
        conversation.push_user("Add a web dashboard");
        conversation
    }

    mod log {
        use super::*;

        #[test]
        fn new_conversation_is_empty() {
            let conversation = Conversation::new();
            assert!(conversation.is_empty());
            assert!(conversation.document().is_none());
        }

        #[test]
        fn turns_keep_insertion_order() {
            let conversation = sample();
            let roles: Vec<_> = conversation.turns().iter().map(|t| t.role()).collect();
            assert_eq!(
                roles,
                vec![TurnRole::User, TurnRole::Assistant, TurnRole::User]
            );
        }
    }

    mod rewrite {
        use super::*;

        #[test]
        fn rewrites_latest_user_turn() {
            let mut conversation = sample();
            assert!(conversation.rewrite_last_user_turn("Web dashboard for admins"));
            assert_eq!(
                conversation.last_turn().unwrap().content(),
                "Web dashboard for admins"
            );
        }

        #[test]
        fn refuses_when_latest_turn_is_assistant() {
            let mut conversation = Conversation::new();
            conversation.push_user("idea");
            conversation.push_assistant("question");
            assert!(!conversation.rewrite_last_user_turn("changed"));
            assert_eq!(conversation.last_turn().unwrap().content(), "question");
        }

        #[test]
        fn previous_assistant_turn_requires_user_tail() {
            let conversation = sample();
            assert_eq!(
                conversation.previous_assistant_turn().unwrap().content(),
                "Here is your plan."
            );

            let mut only_user = Conversation::new();
            only_user.push_user("idea");
            assert!(only_user.previous_assistant_turn().is_none());
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn render_all_lists_every_turn_in_order() {
            let conversation = sample();
            assert_eq!(
                conversation.render_all(),
                "User: Mobile app for food delivery\nAssistant: Here is your plan.\nUser: Add a web dashboard"
            );
        }
    }

    #[test]
    fn replace_document_is_wholesale() {
        let mut conversation = Conversation::new();
        conversation.replace_document(json!({"a": 1, "b": 2}));
        conversation.replace_document(json!({"c": 3}));
        assert_eq!(conversation.document(), Some(&json!({"c": 3})));
    }
}
