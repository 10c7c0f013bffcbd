//! Retrieval result types

use serde::{Deserialize, Serialize};

use crate::domain::example::Example;

/// One example retrieved for a query, with its cosine similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedExample {
    #[serde(flatten)]
    pub example: Example,
    /// Cosine similarity to the query, in [0, 1]
    pub score: f32,
}

impl RetrievedExample {
    pub fn new(example: Example, score: f32) -> Self {
        Self { example, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_flattened() {
        let retrieved = RetrievedExample::new(
            Example::new("ex-1", "Title", "Description", json!({})),
            0.75,
        );

        let value = serde_json::to_value(&retrieved).unwrap();
        assert_eq!(value["id"], "ex-1");
        assert_eq!(value["score"], 0.75);
    }
}
