//! Dialogue phases of a session.

use serde::{Deserialize, Serialize};

/// Where a session stands in its dialogue.
///
/// Synthesis workspaces go `Empty` → `Refining`. The question-driven workspace
/// goes `Empty` → `Questioning` → `Complete` → `Refining`. Reset returns any
/// phase to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialoguePhase {
    /// No turns yet.
    #[default]
    Empty,
    /// Clarifying questions are being asked.
    Questioning,
    /// The final artifact was just produced.
    Complete,
    /// A document exists and further messages update it.
    Refining,
}

impl DialoguePhase {
    /// Returns true if a document is expected to exist in this phase.
    pub fn has_document(&self) -> bool {
        matches!(self, Self::Complete | Self::Refining)
    }

    /// Returns all valid next phases from this phase.
    pub fn valid_next_phases(&self) -> Vec<Self> {
        match self {
            Self::Empty => vec![Self::Questioning, Self::Refining],
            Self::Questioning => vec![Self::Questioning, Self::Complete],
            Self::Complete => vec![Self::Refining],
            Self::Refining => vec![Self::Refining],
        }
    }

    /// Returns true if transition to target phase is valid.
    pub fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_next_phases().contains(target)
    }
}
