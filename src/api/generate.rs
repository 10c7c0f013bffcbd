//! Generate endpoint handler

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::pipeline::PipelineOutcome;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// The natural-language request to turn into a workflow config
    pub query: String,
    /// Override for the number of retrieved examples
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub id: String,
    pub created: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: PipelineOutcome,
}

/// POST /v1/generate
///
/// Runs the full pipeline for one query. Returns 200 whenever the pipeline
/// completed, including when validation failed or the generation text held no
/// JSON; only a malformed request itself is a 4xx.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    if request.query.trim().is_empty() {
        return Err(ApiError::bad_request("query must not be empty").with_param("query"));
    }

    info!(
        request_id = %request_id,
        top_k = ?request.top_k,
        "Processing generate request"
    );

    let outcome = state.pipeline.run(&request.query, request.top_k).await?;

    Ok(Json(GenerateResponse {
        id: request_id,
        created: Utc::now(),
        outcome,
    }))
}
