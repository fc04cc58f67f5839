//! DialogueSession - everything one conversation owns.

use serde_json::Value;

use crate::domain::conversation::{Conversation, DialoguePhase, QuestionRound};
use crate::domain::planning::AnalyzerState;

/// State of one dialogue: the turn log with its document, the phase, and the
/// question engine's bookkeeping.
///
/// Steps run on a clone that replaces the stored session once the step
/// succeeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogueSession {
    conversation: Conversation,
    phase: DialoguePhase,
    analyzer: Option<AnalyzerState>,
    pending_question: Option<QuestionRound>,
}

impl DialogueSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }

    pub fn document(&self) -> Option<&Value> {
        self.conversation.document()
    }

    pub fn phase(&self) -> DialoguePhase {
        self.phase
    }

    pub fn analyzer(&self) -> Option<&AnalyzerState> {
        self.analyzer.as_ref()
    }

    /// The question most recently put to the user, if still unanswered.
    pub fn pending_question(&self) -> Option<&QuestionRound> {
        self.pending_question.as_ref()
    }

    /// Moves to the next phase.
    pub fn advance_to(&mut self, next: DialoguePhase) {
        debug_assert!(
            self.phase.can_transition_to(&next),
            "invalid phase transition {:?} -> {:?}",
            self.phase,
            next
        );
        self.phase = next;
    }

    /// Installs fresh analyzer state for a new question-driven dialogue.
    pub fn start_analysis(&mut self, analyzer: AnalyzerState) {
        self.analyzer = Some(analyzer);
    }

    /// Records a question as asked and keeps it for interpreting the reply.
    pub fn ask(&mut self, round: QuestionRound) {
        if let Some(analyzer) = self.analyzer.as_mut() {
            analyzer.record_question();
        }
        self.pending_question = Some(round);
    }

    /// Takes the pending question, leaving none.
    pub fn take_pending_question(&mut self) -> Option<QuestionRound> {
        self.pending_question.take()
    }

    /// True for a session that has never completed a step, or was reset.
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }

    /// Drops the turn log, document and analysis state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
