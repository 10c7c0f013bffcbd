//! Flowsmith
//!
//! Turns a natural-language request into a validated JSON workflow-automation
//! configuration:
//! - retrieves the most similar labeled examples with a TF-IDF index,
//! - composes a prompt from the schema, the examples and the query,
//! - calls a text-generation endpoint (or a deterministic offline placeholder),
//! - validates the extracted JSON against a draft-07 schema.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
