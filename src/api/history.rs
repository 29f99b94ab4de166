//! Institute history API endpoints

use axum::{
    extract::{Multipart, Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{failed, mutation, MutationResult};
use crate::api::upload::read_form;
use crate::models::{HistoryData, UpdateHistoryInput};
use crate::services::HISTORY_UPDATE_TOAST;

/// History with the image resolved against the image host
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
}

pub fn public_router() -> Router<AppState> {
    Router::new().route("/history", get(get_history))
}

pub fn dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/history", get(get_history_record))
        .route("/history/{id}", put(update_history))
}

async fn current(state: &AppState) -> Result<HistoryData, ApiError> {
    state
        .history_service
        .current()
        .await?
        .ok_or_else(|| ApiError::not_found("History not found"))
}

/// GET /api/v1/history
async fn get_history(State(state): State<AppState>) -> Result<Json<HistoryResponse>, ApiError> {
    let history = current(&state).await?;
    Ok(Json(HistoryResponse {
        image_url: state.media.image_url(&history.image),
        id: history.id,
        title: history.title,
        description: history.description,
    }))
}

/// GET /api/v1/dashboard/history - The record as stored
async fn get_history_record(State(state): State<AppState>) -> Result<Json<HistoryData>, ApiError> {
    Ok(Json(current(&state).await?))
}

/// PUT /api/v1/dashboard/history/{id} - Multipart: title, description, image?
async fn update_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> MutationResult<HistoryData> {
    let mut form = read_form(multipart, &state.config.upload)
        .await
        .map_err(|e| failed(e, HISTORY_UPDATE_TOAST))?;

    let input = UpdateHistoryInput {
        title: form.text("title").to_string(),
        description: form.text("description").to_string(),
        image: form.take_file("image"),
    };

    mutation(state.history_service.update(&id, input).await, HISTORY_UPDATE_TOAST)
}
