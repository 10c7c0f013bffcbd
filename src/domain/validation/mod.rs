//! Validation result types

use serde::{Deserialize, Serialize};

/// Outcome of validating a generated config against the workflow schema.
///
/// Validation failure is a normal result value, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    /// Human-readable messages, one per schema violation
    pub errors: Vec<String>,
    /// Fraction of required top-level fields present and non-null, in [0, 1]
    pub coverage: f64,
}

impl ValidationReport {
    pub fn passed(coverage: f64) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            coverage,
        }
    }

    pub fn failed(errors: Vec<String>, coverage: f64) -> Self {
        Self {
            valid: false,
            errors,
            coverage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passed_report() {
        let report = ValidationReport::passed(1.0);
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert_eq!(report.coverage, 1.0);
    }

    #[test]
    fn test_failed_report() {
        let report = ValidationReport::failed(vec!["missing field".to_string()], 0.5);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.coverage, 0.5);
    }
}
