pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::compile::handlers as compile_handlers;
use crate::scoring::handlers as scoring_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route("/api/v1/score", post(scoring_handlers::handle_score))
        // Compile API
        .route(
            "/api/v1/applications/:id/compile",
            post(compile_handlers::handle_compile),
        )
        .route(
            "/api/v1/applications/:id/snapshots",
            get(compile_handlers::handle_list_snapshots),
        )
        .with_state(state)
}
