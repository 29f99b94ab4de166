//! Notice board API endpoints

use axum::{
    extract::{Multipart, Path, State},
    routing::{delete, get},
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{acknowledge, failed, mutation, MutationResult};
use crate::api::upload::read_form;
use crate::models::{CreateNoticeInput, Notice};
use crate::services::NOTICE_TOASTS;

pub fn public_router() -> Router<AppState> {
    Router::new().route("/notices", get(list_notices))
}

pub fn dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/notices", get(list_notices).post(create_notice))
        .route("/notices/{id}", delete(delete_notice))
}

/// GET /api/v1/notices
async fn list_notices(State(state): State<AppState>) -> Result<Json<Vec<Notice>>, ApiError> {
    Ok(Json(state.notice_service.list().await?))
}

/// POST /api/v1/dashboard/notices - Multipart: title, pdf
async fn create_notice(State(state): State<AppState>, multipart: Multipart) -> MutationResult<Notice> {
    let messages = NOTICE_TOASTS.create;
    let mut form = read_form(multipart, &state.config.upload)
        .await
        .map_err(|e| failed(e, messages))?;

    let input = CreateNoticeInput {
        title: form.text("title").to_string(),
        pdf: form.take_file("pdf"),
    };
    mutation(state.notice_service.create(input).await, messages)
}

/// DELETE /api/v1/dashboard/notices/{id}
async fn delete_notice(State(state): State<AppState>, Path(id): Path<String>) -> MutationResult<()> {
    acknowledge(state.notice_service.delete(&id).await, NOTICE_TOASTS.delete)
}
