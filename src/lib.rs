//! Plan Weaver - conversation-driven document synthesis
//!
//! Turns free-form conversation into structured JSON documents
//! (functional and non-functional requirements, validation reports,
//! project plans and business plans) by prompting an LLM oracle,
//! extracting and repairing its JSON, and revising the document turn by turn.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
