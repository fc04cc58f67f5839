//! Completeness analysis state for question-driven dialogues.
//!
//! The engine stops asking questions when the oracle judges the conversation
//! sufficient, when no further question is produced, or when the question
//! budget is spent. The budget alone guarantees termination.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::conversation::QuestionRound;
use crate::domain::synthesis::DocumentExtractor;

/// Verdict tokens the oracle is asked to answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SufficiencyVocabulary {
    /// `COMPLETE` / `CONTINUE`.
    #[default]
    Standard,
    /// `SUFFICIENT` / `NEED_MORE`.
    Strict,
}

impl SufficiencyVocabulary {
    pub fn affirmative(&self) -> &'static str {
        match self {
            Self::Standard => "COMPLETE",
            Self::Strict => "SUFFICIENT",
        }
    }

    pub fn negative(&self) -> &'static str {
        match self {
            Self::Standard => "CONTINUE",
            Self::Strict => "NEED_MORE",
        }
    }

    /// Reads a verdict from oracle text.
    ///
    /// Only a standalone affirmative token counts, compared case-insensitively.
    /// Anything else, including garbled output, means keep asking.
    pub fn is_affirmative(&self, reply: &str) -> bool {
        let affirmative = self.affirmative();
        reply
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .any(|token| token.eq_ignore_ascii_case(affirmative))
    }
}

/// Outcome of a sufficiency judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Sufficient,
    NeedMore,
}

/// Per-conversation question counter and budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerState {
    questions_asked: u32,
    max_questions: u32,
    vocabulary: SufficiencyVocabulary,
}

impl AnalyzerState {
    pub fn new(max_questions: u32, vocabulary: SufficiencyVocabulary) -> Self {
        Self {
            questions_asked: 0,
            max_questions,
            vocabulary,
        }
    }

    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    pub fn max_questions(&self) -> u32 {
        self.max_questions
    }

    pub fn vocabulary(&self) -> SufficiencyVocabulary {
        self.vocabulary
    }

    /// Records one asked question.
    pub fn record_question(&mut self) {
        self.questions_asked += 1;
    }

    /// True once no further question may be asked.
    pub fn budget_exhausted(&self) -> bool {
        self.questions_asked >= self.max_questions
    }

    /// Interprets a sufficiency reply.
    pub fn judge(&self, reply: &str) -> Verdict {
        if self.vocabulary.is_affirmative(reply) {
            Verdict::Sufficient
        } else {
            Verdict::NeedMore
        }
    }
}

/// Parses a `{question, options}` payload from oracle text.
///
/// Returns `None` when no object can be recovered, the question is missing or
/// blank, or fewer than `min_options` usable options are present.
pub fn parse_question_payload(
    reply: &str,
    min_options: usize,
    max_options: usize,
) -> Option<QuestionRound> {
    let extracted = DocumentExtractor::unlabeled().extract(reply).ok()?;
    let question = extracted.document.get("question")?.as_str()?.to_string();
    let options = extracted
        .document
        .get("options")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();

    QuestionRound::new(question, options, min_options, max_options)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod vocabulary {
        use super::*;

        #[test]
        fn standard_accepts_complete_in_any_case() {
            let vocab = SufficiencyVocabulary::Standard;
            assert!(vocab.is_affirmative("COMPLETE"));
            assert!(vocab.is_affirmative("complete."));
            assert!(vocab.is_affirmative("Verdict: Complete"));
        }

        #[test]
        fn standard_rejects_continue_and_incomplete() {
            let vocab = SufficiencyVocabulary::Standard;
            assert!(!vocab.is_affirmative("CONTINUE"));
            assert!(!vocab.is_affirmative("INCOMPLETE"));
            assert!(!vocab.is_affirmative(""));
        }

        #[test]
        fn strict_uses_sufficient_and_need_more() {
            let vocab = SufficiencyVocabulary::Strict;
            assert!(vocab.is_affirmative("SUFFICIENT"));
            assert!(!vocab.is_affirmative("NEED_MORE"));
            assert!(!vocab.is_affirmative("INSUFFICIENT"));
            assert!(!vocab.is_affirmative("COMPLETE"));
        }

        #[test]
        fn garbled_output_means_need_more() {
            let state = AnalyzerState::new(5, SufficiencyVocabulary::Standard);
            assert_eq!(state.judge("I think we might be done?"), Verdict::NeedMore);
        }
    }

    mod budget {
        use super::*;

        #[test]
        fn exhausts_after_max_questions() {
            let mut state = AnalyzerState::new(3, SufficiencyVocabulary::Strict);
            for _ in 0..3 {
                assert!(!state.budget_exhausted());
                state.record_question();
            }
            assert!(state.budget_exhausted());
            assert_eq!(state.questions_asked(), 3);
        }
    }

    mod question_payload {
        use super::*;

        #[test]
        fn parses_question_and_options() {
            let reply = r#"```json
{"question": "Who pays?", "options": ["Customers", "Restaurants", "Advertisers", "Both"]}
```"#;
            let round = parse_question_payload(reply, 3, 6).unwrap();
            assert_eq!(round.question(), "Who pays?");
            assert_eq!(round.options().len(), 4);
        }

        #[test]
        fn null_question_is_absent() {
            let reply = r#"{"question": null, "options": ["A", "B", "C"]}"#;
            assert!(parse_question_payload(reply, 3, 6).is_none());
        }

        #[test]
        fn too_few_options_is_absent() {
            let reply = r#"{"question": "Q?", "options": ["A", "B"]}"#;
            assert!(parse_question_payload(reply, 3, 6).is_none());
        }

        #[test]
        fn prose_is_absent() {
            assert!(parse_question_payload("No more questions.", 3, 6).is_none());
        }

        #[test]
        fn non_string_options_are_skipped() {
            let reply = r#"{"question": "Q?", "options": ["A", 2, "B", "C"]}"#;
            let round = parse_question_payload(reply, 3, 6).unwrap();
            assert_eq!(round.options(), ["A", "B", "C"]);
        }
    }
}
