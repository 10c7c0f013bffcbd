//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::llm::HttpClient;
use crate::infrastructure::pipeline::GenerationPipeline;

/// Shared state: the pipeline built once at startup around the immutable
/// retrieval index. Handlers only read it, so no synchronization is needed.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<GenerationPipeline<HttpClient>>,
}

impl AppState {
    pub fn new(pipeline: GenerationPipeline<HttpClient>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
