//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port for the supported oracles.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini models
//! - `OpenAIProvider` - OpenAI chat models
//! - `MockAIProvider` - Configurable mock for testing

mod gemini_provider;
mod mock_provider;
mod openai_provider;
mod transport;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockAIProvider, MockError, ScriptedReply};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
