//! Prompt construction for the generation endpoint
//!
//! Pure string assembly: schema, retrieved examples in ranking order, then the
//! user request and the output instruction. Stable inputs produce a stable
//! prompt.

use crate::domain::{RetrievedExample, WorkflowSchema};

const OUTPUT_INSTRUCTION: &str = "Respond with exactly one JSON object that conforms to the \
schema above. Do not include any explanation, markdown or text outside the JSON object.";

/// Render the full generation prompt for a query.
pub fn build_prompt(
    query: &str,
    retrieved: &[RetrievedExample],
    schema: &WorkflowSchema,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are a workflow-automation assistant. Produce a workflow configuration \
as a single JSON object.\n\n",
    );

    prompt.push_str("## Workflow config schema (JSON Schema draft-07)\n\n");
    prompt.push_str(&schema.to_pretty_json());
    prompt.push_str("\n\n");

    if !retrieved.is_empty() {
        prompt.push_str("## Similar examples (best match first)\n\n");

        for (position, item) in retrieved.iter().enumerate() {
            let config = serde_json::to_string_pretty(&item.example.config)
                .unwrap_or_else(|_| item.example.config.to_string());

            prompt.push_str(&format!(
                "### Example {}: {}\n{}\n\n```json\n{}\n```\n\n",
                position + 1,
                item.example.title,
                item.example.description,
                config,
            ));
        }
    }

    prompt.push_str("## Request\n\n");
    prompt.push_str(query);
    prompt.push_str("\n\n");
    prompt.push_str(OUTPUT_INSTRUCTION);
    prompt.push('\n');

    prompt
}
