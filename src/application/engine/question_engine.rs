//! QuestionEngine - the question-driven business plan dialogue.
//!
//! The opening turn greets the user and asks the first multiple-choice
//! question. Each later turn maps a numbered reply back to its option, then
//! either asks again or finalizes. Finalization happens when the budget is
//! spent, when the oracle judges the conversation sufficient, or when it
//! produces no further question.

use serde_json::Value;
use tracing::{debug, info};

use crate::domain::conversation::{
    parse_numbered_options, resolve_selection, DialoguePhase, QuestionRound, MAX_OPTIONS,
    MIN_OPTIONS,
};
use crate::domain::planning::prompts::{
    final_plan_prompt, intro_prompt, question_prompt, sufficiency_prompt,
};
use crate::domain::planning::{
    parse_question_payload, AnalyzerState, SufficiencyVocabulary, Verdict,
};
use crate::domain::session::DialogueSession;
use crate::domain::synthesis::{DocumentKind, EngineError};

use super::{DocumentSynthesizer, Instruction, OracleClient};

/// Budget and vocabulary for a questioning dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSettings {
    pub max_questions: u32,
    pub vocabulary: SufficiencyVocabulary,
    pub min_options: usize,
    pub max_options: usize,
}

impl Default for QuestionSettings {
    fn default() -> Self {
        Self {
            max_questions: 5,
            vocabulary: SufficiencyVocabulary::Standard,
            min_options: MIN_OPTIONS,
            max_options: MAX_OPTIONS,
        }
    }
}

/// Outcome of one questioning step.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionStep {
    /// Another question was put to the user.
    Asked { reply: String, round: QuestionRound },
    /// The final plan was produced.
    Finalized {
        reply: String,
        document: Value,
        final_prompt: String,
    },
}

impl QuestionStep {
    /// Text for the assistant turn.
    pub fn reply(&self) -> &str {
        match self {
            Self::Asked { reply, .. } | Self::Finalized { reply, .. } => reply,
        }
    }
}

/// Drives the questioning phase of a business plan session.
#[derive(Debug, Clone)]
pub struct QuestionEngine {
    synthesizer: DocumentSynthesizer,
    settings: QuestionSettings,
}

impl QuestionEngine {
    pub fn new(synthesizer: DocumentSynthesizer, settings: QuestionSettings) -> Self {
        Self {
            synthesizer,
            settings,
        }
    }

    pub fn settings(&self) -> &QuestionSettings {
        &self.settings
    }

    fn oracle(&self) -> &OracleClient {
        self.synthesizer.oracle()
    }

    /// Opens the dialogue for `idea`, the session's first user turn.
    ///
    /// # Errors
    ///
    /// - `OracleUnavailable` if the oracle fails or gives an empty introduction
    /// - `InvalidQuestionFormat` if no usable first question comes back
    pub async fn open(
        &self,
        session: &mut DialogueSession,
        idea: &str,
    ) -> Result<QuestionStep, EngineError> {
        let intro = self.oracle().invoke(&intro_prompt(idea)).await?;
        if intro.is_empty() {
            return Err(EngineError::oracle_unavailable(
                "oracle returned an empty introduction",
            ));
        }

        let transcript = session.conversation().render_all();
        let round = self.next_question(&transcript).await?.ok_or_else(|| {
            EngineError::invalid_question("the oracle did not produce a usable first question")
        })?;

        session.advance_to(DialoguePhase::Questioning);
        session.start_analysis(AnalyzerState::new(
            self.settings.max_questions,
            self.settings.vocabulary,
        ));
        session.ask(round.clone());

        info!(options = round.options().len(), "Opened questioning dialogue");
        Ok(QuestionStep::Asked {
            reply: format!("{}\n\n{}", intro, round.render()),
            round,
        })
    }

    /// Handles the latest user turn of a session that is still questioning.
    ///
    /// # Errors
    ///
    /// - `NoActiveSession` if the session has no analyzer state
    /// - `OracleUnavailable` or `SynthesisFailed` from the oracle calls
    pub async fn advance(&self, session: &mut DialogueSession) -> Result<QuestionStep, EngineError> {
        resolve_numbered_reply(session);

        let analyzer = session
            .analyzer()
            .cloned()
            .ok_or_else(|| EngineError::no_active_session("no questioning dialogue in progress"))?;

        if analyzer.budget_exhausted() {
            info!(
                asked = analyzer.questions_asked(),
                "Question budget spent, finalizing"
            );
            return self.finalize(session).await;
        }

        let transcript = session.conversation().render_all();
        let verdict_reply = self
            .oracle()
            .invoke(&sufficiency_prompt(analyzer.vocabulary(), &transcript))
            .await?;
        if analyzer.judge(&verdict_reply) == Verdict::Sufficient {
            info!(asked = analyzer.questions_asked(), "Conversation judged sufficient");
            return self.finalize(session).await;
        }

        match self.next_question(&transcript).await? {
            Some(round) => {
                session.ask(round.clone());
                Ok(QuestionStep::Asked {
                    reply: round.render(),
                    round,
                })
            }
            None => {
                info!("No further question produced, finalizing");
                self.finalize(session).await
            }
        }
    }

    async fn next_question(&self, transcript: &str) -> Result<Option<QuestionRound>, EngineError> {
        let prompt = question_prompt(
            transcript,
            self.settings.min_options,
            self.settings.max_options,
        );
        let reply = self.oracle().invoke(&prompt).await?;

        let round =
            parse_question_payload(&reply, self.settings.min_options, self.settings.max_options);
        if round.is_none() {
            debug!(reply_chars = reply.len(), "Question payload unusable");
        }
        Ok(round)
    }

    async fn finalize(&self, session: &mut DialogueSession) -> Result<QuestionStep, EngineError> {
        let final_prompt = final_plan_prompt(&session.conversation().render_all());

        let synthesized = self
            .synthesizer
            .synthesize(
                DocumentKind::BusinessPlan,
                Instruction::Create {
                    description: &final_prompt,
                },
            )
            .await?;

        session
            .conversation_mut()
            .replace_document(synthesized.document.clone());
        session.take_pending_question();
        session.advance_to(DialoguePhase::Complete);

        Ok(QuestionStep::Finalized {
            reply: synthesized.message,
            document: synthesized.document,
            final_prompt,
        })
    }
}

/// Rewrites a bare option number in the latest user turn to the option text.
///
/// The pending question is preferred; without one, the options are recovered
/// from the previous assistant turn. Replies that select nothing pass through.
fn resolve_numbered_reply(session: &mut DialogueSession) {
    let pending = session.take_pending_question();
    let conversation = session.conversation();

    let Some(reply) = conversation.last_turn().map(|t| t.content().to_string()) else {
        return;
    };

    let selected = match pending {
        Some(round) => round.resolve(&reply).map(str::to_string),
        None => {
            let options = conversation
                .previous_assistant_turn()
                .map(|turn| parse_numbered_options(turn.content()))
                .unwrap_or_default();
            resolve_selection(&reply, &options).map(str::to_string)
        }
    };

    if let Some(option) = selected {
        debug!(reply = %reply, option = %option, "Resolved numbered reply");
        session.conversation_mut().rewrite_last_user_turn(option);
    }
}
