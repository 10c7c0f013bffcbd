//! The generation pipeline: retrieve, prompt, generate, validate
//!
//! Built once at startup around an immutable retrieval index; each `run` is
//! independent and stateless. Only the generation HTTP call can block, and it
//! is bounded by the client timeout with offline fallback.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::domain::{
    extract_json, load_examples, DomainError, Example, GenerationMode, RetrievedExample,
    ValidationReport, WorkflowSchema,
};
use crate::infrastructure::llm::{GenerationClient, HttpClient, HttpClientTrait};
use crate::infrastructure::prompt::build_prompt;
use crate::infrastructure::retrieval::TfidfIndex;
use crate::infrastructure::validation::SchemaValidator;

/// Everything one pipeline run produces.
#[derive(Debug, Serialize)]
pub struct PipelineOutcome {
    pub retrieved_examples: Vec<RetrievedExample>,
    pub prompt: String,
    /// Extracted config, absent when no JSON object could be found
    pub generated_config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
    /// Absent when there was no config to validate
    pub validation: Option<ValidationReport>,
    pub mode: GenerationMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// Wires retrieval, prompt construction, generation and validation for a
/// single query.
pub struct GenerationPipeline<C: HttpClientTrait> {
    index: TfidfIndex,
    schema: WorkflowSchema,
    validator: SchemaValidator,
    client: GenerationClient<C>,
    default_top_k: usize,
}

impl GenerationPipeline<HttpClient> {
    /// Build the pipeline from application config: loads the corpus and
    /// schema files and constructs the real HTTP client. Fatal on data or
    /// schema problems, per the startup contract.
    pub fn from_config(config: &AppConfig) -> Result<Self, DomainError> {
        let examples = load_examples(&config.data.examples_path)?;
        let schema = WorkflowSchema::load(&config.data.schema_path)?;

        let timeout = std::time::Duration::from_secs(config.generation.timeout_secs);
        let http = HttpClient::with_timeout(timeout)?;
        let client = GenerationClient::new(http, config.generation.clone());

        Self::new(examples, schema, client, config.retrieval.top_k)
    }
}

impl<C: HttpClientTrait> GenerationPipeline<C> {
    pub fn new(
        examples: Vec<Example>,
        schema: WorkflowSchema,
        client: GenerationClient<C>,
        default_top_k: usize,
    ) -> Result<Self, DomainError> {
        let index = TfidfIndex::build(examples)?;
        let validator = SchemaValidator::new(&schema)?;

        Ok(Self {
            index,
            schema,
            validator,
            client,
            default_top_k: default_top_k.max(1),
        })
    }

    pub fn corpus_size(&self) -> usize {
        self.index.len()
    }

    /// Run the full pipeline for one query.
    ///
    /// Generation faults degrade into offline mode and parse faults are
    /// reported in the outcome; only an empty query is an error here.
    pub async fn run(
        &self,
        query: &str,
        top_k: Option<usize>,
    ) -> Result<PipelineOutcome, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::validation("query must not be empty"));
        }

        let k = top_k.unwrap_or(self.default_top_k).max(1);
        let retrieved = self.index.top_k(query, k);

        debug!(
            query,
            k,
            best = retrieved.first().map(|r| r.example.id.as_str()),
            "Retrieved examples"
        );

        let prompt = build_prompt(query, &retrieved, &self.schema);

        let offline_template = retrieved
            .first()
            .map(|r| r.example.config.clone())
            .unwrap_or_else(|| Value::Object(Default::default()));

        let outcome = self.client.generate(&prompt, &offline_template).await;

        let (generated_config, parse_error) = match extract_json(&outcome.text) {
            Ok(config) => (Some(config), None),
            Err(e) => (None, Some(e.to_string())),
        };

        let validation = generated_config
            .as_ref()
            .map(|config| self.validator.validate(config));

        info!(
            query,
            mode = %outcome.mode,
            parsed = generated_config.is_some(),
            valid = validation.as_ref().map(|v| v.valid),
            "Pipeline run complete"
        );

        Ok(PipelineOutcome {
            retrieved_examples: retrieved,
            prompt,
            generated_config,
            parse_error,
            validation,
            mode: outcome.mode,
            fallback_reason: outcome.fallback_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::domain::parse_examples;
    use crate::infrastructure::llm::mock::MockHttpClient;
    use serde_json::json;

    const STOCK_EXAMPLES: &str = include_str!("../../../data/examples.json");
    const STOCK_SCHEMA: &str = include_str!("../../../data/schema.json");

    fn stock_pipeline(http: MockHttpClient, generation: GenerationConfig) -> GenerationPipeline<MockHttpClient> {
        let examples = parse_examples(STOCK_EXAMPLES).unwrap();
        let schema =
            WorkflowSchema::new(serde_json::from_str(STOCK_SCHEMA).unwrap()).unwrap();
        let client = GenerationClient::new(http, generation);

        GenerationPipeline::new(examples, schema, client, 3).unwrap()
    }

    fn offline_pipeline() -> GenerationPipeline<MockHttpClient> {
        stock_pipeline(MockHttpClient::new(), GenerationConfig::default())
    }

    #[tokio::test]
    async fn test_end_to_end_notification_query() {
        let pipeline = offline_pipeline();

        let outcome = pipeline
            .run("Send email when task duration exceeds 2 hours", Some(3))
            .await
            .unwrap();

        assert_eq!(outcome.retrieved_examples.len(), 3);
        assert_eq!(outcome.retrieved_examples[0].example.id, "notify-long-task");
        assert_eq!(outcome.mode, GenerationMode::Offline);

        let validation = outcome.validation.unwrap();
        assert!(validation.valid);
        assert_eq!(validation.coverage, 1.0);
        assert!(validation.errors.is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let pipeline = offline_pipeline();

        let result = pipeline.run("   ", None).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_prompt_contains_query_and_best_example() {
        let pipeline = offline_pipeline();

        let outcome = pipeline.run("back up my files every night", None).await.unwrap();

        assert!(outcome.prompt.contains("back up my files every night"));
        let best_title = &outcome.retrieved_examples[0].example.title;
        assert!(outcome.prompt.contains(best_title.as_str()));
    }

    #[tokio::test]
    async fn test_unparseable_generation_is_reported_not_fatal() {
        let http = MockHttpClient::new().with_response(
            "https://api.openai.com/v1/chat/completions",
            json!({"choices": [{"message": {"content": "I cannot produce a config, sorry."}}]}),
        );
        let generation = GenerationConfig {
            api_key: Some("sk-test".to_string()),
            ..GenerationConfig::default()
        };
        let pipeline = stock_pipeline(http, generation);

        let outcome = pipeline.run("send email on failure", None).await.unwrap();

        assert_eq!(outcome.mode, GenerationMode::Online);
        assert!(outcome.generated_config.is_none());
        assert!(outcome.parse_error.is_some());
        assert!(outcome.validation.is_none());
    }

    #[tokio::test]
    async fn test_online_failure_degrades_to_offline() {
        let http = MockHttpClient::new()
            .with_error("https://api.openai.com/v1/chat/completions", "timed out");
        let generation = GenerationConfig {
            api_key: Some("sk-test".to_string()),
            ..GenerationConfig::default()
        };
        let pipeline = stock_pipeline(http, generation);

        let outcome = pipeline.run("send email on failure", None).await.unwrap();

        assert_eq!(outcome.mode, GenerationMode::Offline);
        assert!(outcome.fallback_reason.unwrap().contains("timed out"));
        assert!(outcome.validation.unwrap().valid);
    }

    #[tokio::test]
    async fn test_stock_corpus_has_six_schema_valid_examples() {
        let examples = parse_examples(STOCK_EXAMPLES).unwrap();
        assert_eq!(examples.len(), 6);

        let schema =
            WorkflowSchema::new(serde_json::from_str(STOCK_SCHEMA).unwrap()).unwrap();
        let validator = SchemaValidator::new(&schema).unwrap();

        for example in &examples {
            let report = validator.validate(&example.config);
            assert!(report.valid, "stock example {} is invalid: {:?}", example.id, report.errors);
        }
    }
}
