//! Synthesis domain module.
//!
//! Document kinds, their prompts, and recovery of JSON documents from
//! free-form oracle replies.

mod document_kind;
mod errors;
mod extractor;
pub mod prompts;

pub use document_kind::{DialogueMode, DocumentKind, UnknownDocumentKind, MESSAGE_LABEL};
pub use errors::{EngineError, ExtractionError};
pub use extractor::{DocumentExtractor, ExtractedDocument, SectionLabels};
pub use prompts::InstructionKind;
