pub mod health;

use axum::{routing::get, Router};

use crate::outlook::handlers::handle_outlook;
use crate::programs::handlers::{handle_program_jobs, handle_searchable_programs};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/outlook/:noc", get(handle_outlook))
        .route("/api/v1/programs/searchable", get(handle_searchable_programs))
        .route("/api/v1/programs/:nid/jobs", get(handle_program_jobs))
        .with_state(state)
}
