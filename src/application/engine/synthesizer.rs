//! DocumentSynthesizer - prompt, extract, repair, retry.
//!
//! One synthesis is a bounded loop. The first attempt sends the kind's
//! system instruction with the create or update task; every failed
//! extraction turns the next attempt into a repair request carrying the bad
//! candidate. The repair exchange never touches the conversation log.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::domain::conversation::Turn;
use crate::domain::synthesis::prompts::{
    compose, create_task, repair_task, system_prompt, update_task,
};
use crate::domain::synthesis::{
    DocumentExtractor, DocumentKind, EngineError, ExtractionError, InstructionKind,
};

use super::OracleClient;

/// What the oracle is asked to do.
#[derive(Debug, Clone, Copy)]
pub enum Instruction<'a> {
    /// Draft a document from a description.
    Create { description: &'a str },
    /// Revise `current` in light of recent turns and a new message.
    Update {
        current: &'a Value,
        history: &'a [Turn],
        message: &'a str,
    },
}

impl Instruction<'_> {
    fn kind(&self) -> InstructionKind {
        match self {
            Self::Create { .. } => InstructionKind::Create,
            Self::Update { .. } => InstructionKind::Update,
        }
    }

    fn task(&self, kind: DocumentKind) -> String {
        match *self {
            Self::Create { description } => create_task(kind, description),
            Self::Update {
                current,
                history,
                message,
            } => update_task(kind, current, history, message),
        }
    }
}

/// A successfully synthesized document.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesized {
    pub document: Value,
    /// Accompanying text for the user; the kind's default when the oracle
    /// supplied none.
    pub message: String,
    /// Attempts used, starting at 1.
    pub attempts: u32,
}

/// Produces and revises documents through the oracle.
#[derive(Debug, Clone)]
pub struct DocumentSynthesizer {
    oracle: OracleClient,
    max_attempts: u32,
}

impl DocumentSynthesizer {
    /// Attempts default to 3 in configuration. A value of 0 is treated as 1.
    pub fn new(oracle: OracleClient, max_attempts: u32) -> Self {
        Self {
            oracle,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn oracle(&self) -> &OracleClient {
        &self.oracle
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Runs the synthesis loop for one document.
    ///
    /// # Errors
    ///
    /// - `OracleUnavailable` as soon as any oracle call fails
    /// - `SynthesisFailed` when every attempt produced unusable JSON
    pub async fn synthesize(
        &self,
        kind: DocumentKind,
        instruction: Instruction<'_>,
    ) -> Result<Synthesized, EngineError> {
        let instruction_kind = instruction.kind();
        let system = system_prompt(kind, instruction_kind);
        let extractor = DocumentExtractor::new(kind.labels());

        let mut task = instruction.task(kind);
        let mut last_error = String::new();

        for attempt in 1..=self.max_attempts {
            let reply = self.oracle.invoke(&compose(system, &task)).await?;

            match extractor.extract(&reply) {
                Ok(extracted) => {
                    info!(%kind, attempt, "Document synthesized");
                    let message = extracted.message.unwrap_or_else(|| match instruction_kind {
                        InstructionKind::Create => kind.created_message(),
                        InstructionKind::Update => kind.updated_message(),
                    });
                    return Ok(Synthesized {
                        document: extracted.document,
                        message,
                        attempts: attempt,
                    });
                }
                Err(err) => {
                    warn!(%kind, attempt, error = %err, "Document extraction failed");
                    let candidate = match &err {
                        ExtractionError::JsonParseError { candidate, .. } => candidate.clone(),
                        ExtractionError::MalformedDocument => reply,
                    };
                    last_error = err.to_string();
                    task = repair_task(&candidate);
                }
            }
        }

        error!(
            %kind,
            attempts = self.max_attempts,
            last_error = %last_error,
            "Document synthesis exhausted its attempts"
        );
        Err(EngineError::SynthesisFailed {
            attempts: self.max_attempts,
            last_error,
        })
    }
}
