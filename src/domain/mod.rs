//! Domain entities, result types and errors

pub mod error;
pub mod example;
pub mod generation;
pub mod retrieval;
pub mod schema;
pub mod validation;

pub use error::DomainError;
pub use example::{load_examples, parse_examples, Example};
pub use generation::{extract_json, GenerationMode, GenerationOutcome};
pub use retrieval::RetrievedExample;
pub use schema::WorkflowSchema;
pub use validation::ValidationReport;
