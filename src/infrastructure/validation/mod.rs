//! JSON Schema validation of generated configs

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

use crate::domain::{DomainError, ValidationReport, WorkflowSchema};

/// Draft-07 validator compiled once from the workflow schema.
pub struct SchemaValidator {
    compiled: JSONSchema,
    required_fields: Vec<String>,
}

impl SchemaValidator {
    pub fn new(schema: &WorkflowSchema) -> Result<Self, DomainError> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema.raw())
            .map_err(|e| DomainError::schema(format!("Failed to compile workflow schema: {}", e)))?;

        let required_fields = schema
            .required_fields()
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(Self {
            compiled,
            required_fields,
        })
    }

    /// Validate `config` structurally and compute required-field coverage.
    ///
    /// Always returns a report; validation failure is a result, not an error.
    pub fn validate(&self, config: &Value) -> ValidationReport {
        let coverage = self.coverage(config);

        match self.compiled.validate(config) {
            Ok(()) => ValidationReport::passed(coverage),
            Err(errors) => {
                let messages: Vec<String> = errors
                    .map(|e| format!("{}: {}", e.instance_path, e))
                    .collect();

                ValidationReport::failed(messages, coverage)
            }
        }
    }

    /// Fraction of required top-level fields present and non-null. 1.0 when
    /// the schema declares no required fields.
    fn coverage(&self, config: &Value) -> f64 {
        if self.required_fields.is_empty() {
            return 1.0;
        }

        let populated = self
            .required_fields
            .iter()
            .filter(|field| {
                config
                    .get(field.as_str())
                    .is_some_and(|value| !value.is_null())
            })
            .count();

        populated as f64 / self.required_fields.len() as f64
    }
}
