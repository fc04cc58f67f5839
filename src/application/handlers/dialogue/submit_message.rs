//! SubmitMessageHandler - one user message in, one assistant turn out.
//!
//! The first message of a session creates the document (or opens the
//! questioning dialogue for business plans). Later messages update the
//! document or advance the questions. Each step runs on a working copy that
//! replaces the stored session only when the step succeeds, so the log only
//! ever grows by whole user/assistant pairs.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::application::engine::{
    DocumentSynthesizer, Instruction, QuestionEngine, QuestionStep,
};
use crate::domain::conversation::{DialoguePhase, QuestionRound, Turn};
use crate::domain::foundation::{SessionKey, ValidationError};
use crate::domain::session::DialogueSession;
use crate::domain::synthesis::{DialogueMode, DocumentKind, EngineError};
use crate::ports::SessionStore;

use super::DialogueError;

/// Command to submit a user message to a session.
#[derive(Debug, Clone)]
pub struct SubmitMessageCommand {
    pub session: SessionKey,
    pub message: String,
}

impl SubmitMessageCommand {
    pub fn new(session: SessionKey, message: impl Into<String>) -> Self {
        Self {
            session,
            message: message.into(),
        }
    }
}

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitMessageResult {
    /// Text of the assistant turn that was appended.
    pub reply: String,
    /// The document after this step.
    pub document: Option<Value>,
    /// True when this message opened the session.
    pub is_initial: bool,
    /// True once a questioning dialogue has produced its plan.
    pub satisfied: bool,
    /// The question just asked, if any.
    pub question: Option<QuestionRound>,
    /// The long-form plan prompt, on the step that finalized.
    pub final_prompt: Option<String>,
    pub message_count: usize,
    pub phase: DialoguePhase,
}

/// What a step produced besides the reply text.
struct StepOutcome {
    reply: String,
    question: Option<QuestionRound>,
    final_prompt: Option<String>,
}

impl StepOutcome {
    fn reply(reply: String) -> Self {
        Self {
            reply,
            question: None,
            final_prompt: None,
        }
    }
}

impl From<QuestionStep> for StepOutcome {
    fn from(step: QuestionStep) -> Self {
        match step {
            QuestionStep::Asked { reply, round } => Self {
                reply,
                question: Some(round),
                final_prompt: None,
            },
            QuestionStep::Finalized {
                reply,
                final_prompt,
                ..
            } => Self {
                reply,
                question: None,
                final_prompt: Some(final_prompt),
            },
        }
    }
}

/// Handler for submitting messages to one workspace.
pub struct SubmitMessageHandler {
    kind: DocumentKind,
    store: Arc<dyn SessionStore>,
    synthesizer: DocumentSynthesizer,
    questions: QuestionEngine,
    history_window: usize,
}

impl SubmitMessageHandler {
    pub fn new(
        kind: DocumentKind,
        store: Arc<dyn SessionStore>,
        synthesizer: DocumentSynthesizer,
        questions: QuestionEngine,
        history_window: usize,
    ) -> Self {
        Self {
            kind,
            store,
            synthesizer,
            questions,
            history_window,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Handles a submit command.
    ///
    /// The session stays locked for the whole step, oracle calls included.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank message
    /// - `Store` when a new session would exceed capacity
    /// - any `EngineError` from the step, with the session left unchanged
    pub async fn handle(
        &self,
        cmd: SubmitMessageCommand,
    ) -> Result<SubmitMessageResult, DialogueError> {
        if cmd.message.trim().is_empty() {
            return Err(ValidationError::empty_field("message").into());
        }

        let handle = self.store.checkout(&cmd.session).await?;
        let mut session = handle.lock().await;
        let mut working = session.clone();

        // Committed only on success; a dropped future leaves the session as it was.
        match self.step(&mut working, &cmd.message).await {
            Ok(result) => {
                *session = working;
                info!(
                    kind = %self.kind,
                    session = %cmd.session,
                    is_initial = result.is_initial,
                    phase = ?result.phase,
                    message_count = result.message_count,
                    "Message processed"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(
                    kind = %self.kind,
                    session = %cmd.session,
                    error = %err,
                    "Message failed, session unchanged"
                );
                drop(session);
                drop(handle);
                self.store.release(&cmd.session).await;
                Err(err.into())
            }
        }
    }

    async fn step(
        &self,
        session: &mut DialogueSession,
        message: &str,
    ) -> Result<SubmitMessageResult, EngineError> {
        session.conversation_mut().push_user(message);
        let is_initial = session.conversation().len() == 1;

        let outcome = match (self.kind.mode(), session.phase()) {
            (DialogueMode::Synthesis, _) if is_initial => {
                self.create_document(session, message).await?
            }
            (DialogueMode::Questioning, DialoguePhase::Empty) if is_initial => {
                self.questions.open(session, message).await?.into()
            }
            (DialogueMode::Questioning, DialoguePhase::Questioning) => {
                self.questions.advance(session).await?.into()
            }
            (_, phase) if phase.has_document() => self.update_document(session, message).await?,
            _ => {
                return Err(EngineError::no_active_session(format!(
                    "no {} to update; start a new conversation",
                    self.kind.display_name()
                )))
            }
        };

        session.conversation_mut().push_assistant(outcome.reply.clone());

        Ok(SubmitMessageResult {
            reply: outcome.reply,
            document: session.document().cloned(),
            is_initial,
            satisfied: self.kind.mode() == DialogueMode::Questioning
                && session.phase().has_document(),
            question: outcome.question,
            final_prompt: outcome.final_prompt,
            message_count: session.conversation().len(),
            phase: session.phase(),
        })
    }

    async fn create_document(
        &self,
        session: &mut DialogueSession,
        description: &str,
    ) -> Result<StepOutcome, EngineError> {
        let synthesized = self
            .synthesizer
            .synthesize(self.kind, Instruction::Create { description })
            .await?;

        session.conversation_mut().replace_document(synthesized.document);
        session.advance_to(DialoguePhase::Refining);
        Ok(StepOutcome::reply(synthesized.message))
    }

    async fn update_document(
        &self,
        session: &mut DialogueSession,
        message: &str,
    ) -> Result<StepOutcome, EngineError> {
        let current = session.document().ok_or_else(|| {
            EngineError::no_active_session(format!(
                "no {} to update",
                self.kind.display_name()
            ))
        })?;
        let history = preceding_turns(session.conversation().turns(), self.history_window);

        let synthesized = self
            .synthesizer
            .synthesize(
                self.kind,
                Instruction::Update {
                    current,
                    history,
                    message,
                },
            )
            .await?;

        session.conversation_mut().replace_document(synthesized.document);
        session.advance_to(DialoguePhase::Refining);
        Ok(StepOutcome::reply(synthesized.message))
    }
}

/// Up to `window` turns before the newest one.
fn preceding_turns(turns: &[Turn], window: usize) -> &[Turn] {
    let prior = &turns[..turns.len().saturating_sub(1)];
    &prior[prior.len().saturating_sub(window)..]
}
