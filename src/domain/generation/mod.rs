//! Generation outcome types and JSON extraction

mod extract;

pub use extract::extract_json;

use serde::{Deserialize, Serialize};

/// How the generation text was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Text came from the external generation endpoint
    Online,
    /// Text is the deterministic local placeholder
    Offline,
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// The raw result of a generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Raw text returned by the endpoint or synthesized locally
    pub text: String,
    pub mode: GenerationMode,
    /// Why an online attempt fell back to offline, when it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl GenerationOutcome {
    pub fn online(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: GenerationMode::Online,
            fallback_reason: None,
        }
    }

    pub fn offline(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: GenerationMode::Offline,
            fallback_reason: None,
        }
    }

    pub fn with_fallback_reason(mut self, reason: impl Into<String>) -> Self {
        self.fallback_reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&GenerationMode::Online).unwrap(),
            "\"online\""
        );
        assert_eq!(
            serde_json::to_string(&GenerationMode::Offline).unwrap(),
            "\"offline\""
        );
    }

    #[test]
    fn test_offline_outcome() {
        let outcome = GenerationOutcome::offline("{}");
        assert_eq!(outcome.mode, GenerationMode::Offline);
        assert!(outcome.fallback_reason.is_none());
    }

    #[test]
    fn test_fallback_reason() {
        let outcome =
            GenerationOutcome::offline("{}").with_fallback_reason("HTTP 503 from endpoint");
        assert_eq!(
            outcome.fallback_reason.as_deref(),
            Some("HTTP 503 from endpoint")
        );
    }
}
