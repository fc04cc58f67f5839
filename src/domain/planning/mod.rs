//! Planning domain module.
//!
//! Completeness analysis and prompts for the question-driven dialogue.

mod analyzer;
pub mod prompts;

pub use analyzer::{parse_question_payload, AnalyzerState, SufficiencyVocabulary, Verdict};
