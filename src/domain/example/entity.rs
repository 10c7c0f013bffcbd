use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A labeled workflow example used as retrieval corpus and prompt material.
///
/// Immutable once loaded; identity is the `id` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    /// Unique identifier within the corpus
    pub id: String,
    /// Short human-readable title
    pub title: String,
    /// One or two sentences describing what the workflow does
    pub description: String,
    /// The workflow configuration itself
    pub config: Value,
}

impl Example {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        config: Value,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            config,
        }
    }

    /// Text a retriever indexes for this example: title, description and the
    /// top-level keys of the config.
    pub fn indexed_text(&self) -> String {
        let mut text = format!("{} {}", self.title, self.description);

        if let Some(object) = self.config.as_object() {
            for key in object.keys() {
                text.push(' ');
                text.push_str(key);
            }
        }

        text
    }
}
