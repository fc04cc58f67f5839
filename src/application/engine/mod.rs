//! Synthesis engine services.
//!
//! - `OracleClient` - timeout-bounded prompt to text
//! - `DocumentSynthesizer` - create and update with the repair loop
//! - `QuestionEngine` - the questioning dialogue that ends in a business plan

mod oracle_client;
mod question_engine;
mod synthesizer;

pub use oracle_client::OracleClient;
pub use question_engine::{QuestionEngine, QuestionSettings, QuestionStep};
pub use synthesizer::{DocumentSynthesizer, Instruction, Synthesized};
