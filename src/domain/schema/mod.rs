//! The workflow-config JSON Schema (draft-07)

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::domain::DomainError;

/// The draft-07 JSON Schema a generated workflow config must conform to.
///
/// Wraps the raw schema document; loaded once at startup and read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct WorkflowSchema {
    raw: Value,
}

impl WorkflowSchema {
    /// Wrap an already-parsed schema document.
    pub fn new(raw: Value) -> Result<Self, DomainError> {
        if !raw.is_object() {
            return Err(DomainError::schema("schema document must be a JSON object"));
        }

        Ok(Self { raw })
    }

    /// Load the schema document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::schema(format!("Failed to read schema {}: {}", path.display(), e))
        })?;

        let raw: Value = serde_json::from_str(&content).map_err(|e| {
            DomainError::schema(format!("Invalid schema {}: {}", path.display(), e))
        })?;

        let schema = Self::new(raw)?;

        info!(
            required = schema.required_fields().len(),
            path = %path.display(),
            "Loaded workflow schema"
        );

        Ok(schema)
    }

    /// The raw schema document.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Top-level required field names declared by the schema. Empty when the
    /// schema declares no `required` array.
    pub fn required_fields(&self) -> Vec<&str> {
        self.raw
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Pretty-printed form for embedding into prompts.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}
