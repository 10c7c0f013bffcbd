use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::generate;
use super::health;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/ready", get(health::ready_check))
        .route("/v1/generate", post(generate::generate))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
