use axum::extract::{Path, State};
use axum::Json;

use crate::errors::AppError;
use crate::programs::client::{Program, ProgramJob};
use crate::state::AppState;

/// GET /api/v1/programs/searchable
pub async fn handle_searchable_programs(
    State(state): State<AppState>,
) -> Result<Json<Vec<Program>>, AppError> {
    let programs = state.programs.searchable().await?;
    Ok(Json(programs.as_ref().clone()))
}

/// GET /api/v1/programs/:nid/jobs
pub async fn handle_program_jobs(
    State(state): State<AppState>,
    Path(nid): Path<i64>,
) -> Result<Json<Vec<ProgramJob>>, AppError> {
    let jobs = state.programs.jobs_for_program(nid).await?;
    Ok(Json(jobs))
}
