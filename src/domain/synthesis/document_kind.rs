//! Document kinds served by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::extractor::SectionLabels;

/// Trailing label shared by every kind.
pub const MESSAGE_LABEL: &str = "MESSAGE:";

/// How a workspace turns messages into a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueMode {
    /// First message creates the document, later messages update it.
    Synthesis,
    /// Clarifying questions are asked before the document is produced.
    Questioning,
}

/// The structured artifact a workspace produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    FunctionalRequirements,
    NonFunctionalRequirements,
    ValidationReport,
    ProjectPlan,
    BusinessPlan,
}

impl DocumentKind {
    /// Every kind, in route order.
    pub const ALL: [DocumentKind; 5] = [
        Self::FunctionalRequirements,
        Self::NonFunctionalRequirements,
        Self::ValidationReport,
        Self::ProjectPlan,
        Self::BusinessPlan,
    ];

    /// URL segment for the workspace.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::FunctionalRequirements => "functional-requirements",
            Self::NonFunctionalRequirements => "non-functional-requirements",
            Self::ValidationReport => "validation-report",
            Self::ProjectPlan => "project-plan",
            Self::BusinessPlan => "business-plan",
        }
    }

    /// Lowercase name used inside prompts and messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FunctionalRequirements => "functional requirements",
            Self::NonFunctionalRequirements => "non-functional requirements",
            Self::ValidationReport => "validation report",
            Self::ProjectPlan => "project plan",
            Self::BusinessPlan => "business plan",
        }
    }

    /// Snake-case field name of the document in API payloads.
    pub fn document_field(&self) -> &'static str {
        match self {
            Self::FunctionalRequirements => "functional_requirements",
            Self::NonFunctionalRequirements => "non_functional_requirements",
            Self::ValidationReport => "validation_report",
            Self::ProjectPlan => "project_plan",
            Self::BusinessPlan => "business_plan",
        }
    }

    /// Leading and trailing labels of the labeled reply convention.
    pub fn labels(&self) -> SectionLabels {
        let leading = match self {
            Self::FunctionalRequirements => "FUNCTIONAL_REQUIREMENTS:",
            Self::NonFunctionalRequirements => "NON_FUNCTIONAL_REQUIREMENTS:",
            Self::ValidationReport => "VALIDATION_REPORT:",
            Self::ProjectPlan => "PROJECT_PLAN:",
            Self::BusinessPlan => "BUSINESS_PLAN:",
        };
        SectionLabels::new(leading, MESSAGE_LABEL)
    }

    pub fn mode(&self) -> DialogueMode {
        match self {
            Self::BusinessPlan => DialogueMode::Questioning,
            _ => DialogueMode::Synthesis,
        }
    }

    /// Message used when a created document came without one.
    pub fn created_message(&self) -> String {
        format!("{} generated successfully.", capitalize(self.display_name()))
    }

    /// Message used when an updated document came without one.
    pub fn updated_message(&self) -> String {
        format!("{} updated successfully.", capitalize(self.display_name()))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Error returned when a slug names no document kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document kind: {0}")]
pub struct UnknownDocumentKind(pub String);

impl FromStr for DocumentKind {
    type Err = UnknownDocumentKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| UnknownDocumentKind(s.to_string()))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
