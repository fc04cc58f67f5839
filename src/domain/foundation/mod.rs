//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers, timestamps and validation errors used by the
//! conversation and synthesis modules.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::SessionKey;
pub use timestamp::Timestamp;
