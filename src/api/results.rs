//! Exam result API endpoints

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::models::{ProcessedResult, SchoolResultInfo, StudentResultQuery};

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/result/school-info", get(get_school_info))
        .route("/result/individual", get(get_individual_result))
}

/// GET /api/v1/result/school-info - Options for the search form
async fn get_school_info(State(state): State<AppState>) -> Result<Json<SchoolResultInfo>, ApiError> {
    Ok(Json(state.result_service.school_info().await?))
}

/// GET /api/v1/result/individual?student_id=&exam_name=&year=
async fn get_individual_result(
    State(state): State<AppState>,
    Query(query): Query<StudentResultQuery>,
) -> Result<Json<ProcessedResult>, ApiError> {
    state
        .result_service
        .lookup(&query)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No result found for this student"))
}
