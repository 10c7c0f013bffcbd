pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod retrieval;
pub mod validation;
