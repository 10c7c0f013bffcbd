//! Generation client: one call to the external endpoint, or a deterministic
//! offline placeholder
//!
//! Online failures of any kind (network, timeout, non-2xx, unparseable body)
//! degrade into the offline placeholder with the reason recorded; they never
//! surface as pipeline errors.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::http_client::HttpClientTrait;
use crate::config::GenerationConfig;
use crate::domain::{DomainError, GenerationOutcome};

/// Client for the text-generation endpoint (OpenAI-style chat completions).
#[derive(Debug)]
pub struct GenerationClient<C: HttpClientTrait> {
    client: C,
    config: GenerationConfig,
}

impl<C: HttpClientTrait> GenerationClient<C> {
    pub fn new(client: C, config: GenerationConfig) -> Self {
        let config = GenerationConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };

        Self { client, config }
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    /// Produce generation text for `prompt`.
    ///
    /// With a configured credential this makes exactly one HTTP request and
    /// falls back to the placeholder on any failure. Without one it never
    /// performs network I/O. `offline_template` is a schema-conformant config
    /// (the best retrieved example) echoed by the placeholder.
    pub async fn generate(&self, prompt: &str, offline_template: &Value) -> GenerationOutcome {
        if !self.config.has_credential() {
            debug!("No generation credential configured, using offline placeholder");
            return self.offline_placeholder(offline_template);
        }

        match self.request_completion(prompt).await {
            Ok(text) => GenerationOutcome::online(text),
            Err(e) => {
                warn!(error = %e, "Generation request failed, falling back to offline placeholder");
                self.offline_placeholder(offline_template)
                    .with_fallback_reason(e.to_string())
            }
        }
    }

    async fn request_completion(&self, prompt: &str) -> Result<String, DomainError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::configuration("generation credential missing"))?;

        let body = json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
        });

        let authorization = format!("Bearer {}", api_key);
        let headers = vec![
            ("Authorization", authorization.as_str()),
            ("Content-Type", "application/json"),
        ];

        let response = self
            .client
            .post_json(&self.completions_url(), headers, &body)
            .await?;

        let completion: ChatCompletionResponse = serde_json::from_value(response)
            .map_err(|e| DomainError::provider("generation", format!("Unexpected response shape: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| DomainError::provider("generation", "response contained no choices"))
    }

    /// Deterministic placeholder: echoes the template config inside a fenced
    /// block, so downstream extraction runs the same path as online text.
    fn offline_placeholder(&self, template: &Value) -> GenerationOutcome {
        let config = serde_json::to_string_pretty(template).unwrap_or_else(|_| template.to_string());

        GenerationOutcome::offline(format!(
            "Offline placeholder based on the closest example.\n```json\n{}\n```\n",
            config
        ))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{extract_json, GenerationMode};
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://api.openai.com/v1/chat/completions";

    fn online_config() -> GenerationConfig {
        GenerationConfig {
            api_key: Some("sk-test".to_string()),
            ..GenerationConfig::default()
        }
    }

    #[tokio::test]
    async fn test_offline_mode_never_calls_network() {
        let client = GenerationClient::new(MockHttpClient::new(), GenerationConfig::default());

        let outcome = client.generate("prompt", &json!({"name": "demo"})).await;

        assert_eq!(outcome.mode, GenerationMode::Offline);
        assert!(outcome.fallback_reason.is_none());
        assert!(client.client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_offline_placeholder_is_deterministic_and_extractable() {
        let client = GenerationClient::new(MockHttpClient::new(), GenerationConfig::default());
        let template = json!({"name": "demo", "trigger": {"nodeType": "cron"}});

        let first = client.generate("prompt", &template).await;
        let second = client.generate("prompt", &template).await;
        assert_eq!(first.text, second.text);

        let extracted = extract_json(&first.text).unwrap();
        assert_eq!(extracted, template);
    }

    #[tokio::test]
    async fn test_online_success() {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"name\": \"generated\"}"}}]
        });
        let http = MockHttpClient::new().with_response(TEST_URL, response);
        let client = GenerationClient::new(http, online_config());

        let outcome = client.generate("prompt", &json!({})).await;

        assert_eq!(outcome.mode, GenerationMode::Online);
        assert_eq!(outcome.text, "{\"name\": \"generated\"}");
        assert!(outcome.fallback_reason.is_none());
    }

    #[tokio::test]
    async fn test_online_failure_falls_back_with_reason() {
        let http = MockHttpClient::new().with_error(TEST_URL, "connection reset");
        let client = GenerationClient::new(http, online_config());
        let template = json!({"name": "fallback"});

        let outcome = client.generate("prompt", &template).await;

        assert_eq!(outcome.mode, GenerationMode::Offline);
        let reason = outcome.fallback_reason.unwrap();
        assert!(reason.contains("connection reset"));
        assert!(outcome.text.contains("fallback"));
    }

    #[tokio::test]
    async fn test_unexpected_response_shape_falls_back() {
        let http = MockHttpClient::new().with_response(TEST_URL, json!({"unexpected": true}));
        let client = GenerationClient::new(http, online_config());

        let outcome = client.generate("prompt", &json!({"name": "t"})).await;

        assert_eq!(outcome.mode, GenerationMode::Offline);
        assert!(outcome.fallback_reason.is_some());
    }

    #[tokio::test]
    async fn test_custom_base_url_trailing_slash() {
        let url = "http://localhost:9000/v1/chat/completions";
        let response = json!({"choices": [{"message": {"content": "{}"}}]});
        let http = MockHttpClient::new().with_response(url, response);

        let config = GenerationConfig {
            api_key: Some("sk-test".to_string()),
            base_url: "http://localhost:9000/".to_string(),
            ..GenerationConfig::default()
        };
        let client = GenerationClient::new(http, config);

        let outcome = client.generate("prompt", &json!({})).await;
        assert_eq!(outcome.mode, GenerationMode::Online);
    }
}
