//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Sessions live for the lifetime of the process

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
