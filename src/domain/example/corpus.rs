//! Loading the example corpus from disk

use std::path::Path;

use tracing::info;

use super::Example;
use crate::domain::DomainError;

/// Load the labeled example corpus from a JSON file.
///
/// The file must contain an array of objects each carrying `id`, `title`,
/// `description` and `config`. File order is preserved; no deduplication.
pub fn load_examples(path: impl AsRef<Path>) -> Result<Vec<Example>, DomainError> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| {
        DomainError::data(format!(
            "Failed to read example corpus {}: {}",
            path.display(),
            e
        ))
    })?;

    let examples = parse_examples(&content)
        .map_err(|e| DomainError::data(format!("Invalid example corpus {}: {}", path.display(), e)))?;

    info!(count = examples.len(), path = %path.display(), "Loaded example corpus");

    Ok(examples)
}

/// Parse a corpus from raw JSON text.
pub fn parse_examples(content: &str) -> Result<Vec<Example>, DomainError> {
    let examples: Vec<Example> = serde_json::from_str(content)
        .map_err(|e| DomainError::data(format!("expected a list of example objects: {}", e)))?;

    for example in &examples {
        if example.id.trim().is_empty() {
            return Err(DomainError::data("example with empty id"));
        }
    }

    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_corpus() {
        let raw = r#"[
            {"id": "a", "title": "A", "description": "First", "config": {"name": "a"}},
            {"id": "b", "title": "B", "description": "Second", "config": {"name": "b"}}
        ]"#;

        let examples = parse_examples(raw).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].id, "a");
        assert_eq!(examples[1].id, "b");
    }

    #[test]
    fn test_parse_rejects_non_list() {
        let result = parse_examples(r#"{"id": "a"}"#);
        assert!(matches!(result, Err(DomainError::Data { .. })));
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let result = parse_examples(r#"[{"id": "a", "title": "A"}]"#);
        assert!(matches!(result, Err(DomainError::Data { .. })));
    }

    #[test]
    fn test_parse_rejects_empty_id() {
        let raw = r#"[{"id": " ", "title": "A", "description": "D", "config": {}}]"#;
        let result = parse_examples(raw);
        assert!(matches!(result, Err(DomainError::Data { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_examples("/nonexistent/examples.json");
        assert!(matches!(result, Err(DomainError::Data { .. })));
    }
}
