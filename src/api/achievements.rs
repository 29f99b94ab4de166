//! Achievement API endpoints

use axum::{
    extract::{Multipart, Path, State},
    routing::{get, put},
    Json, Router,
};

use crate::api::common::image_content_input;
use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{acknowledge, failed, mutation, MutationResult};
use crate::api::upload::read_form;
use crate::models::Achievement;
use crate::services::ACHIEVEMENT_TOASTS;

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/achievements", get(list_achievements))
        .route("/achievements/{id}", get(get_achievement))
}

pub fn dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/achievements", get(list_achievements).post(create_achievement))
        .route(
            "/achievements/{id}",
            put(update_achievement).delete(delete_achievement),
        )
}

/// GET /api/v1/achievements
async fn list_achievements(State(state): State<AppState>) -> Result<Json<Vec<Achievement>>, ApiError> {
    Ok(Json(state.achievement_service.list().await?))
}

/// GET /api/v1/achievements/{id}
async fn get_achievement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Achievement>, ApiError> {
    Ok(Json(state.achievement_service.require(&id).await?))
}

/// POST /api/v1/dashboard/achievements - Multipart: title, description, image
async fn create_achievement(State(state): State<AppState>, multipart: Multipart) -> MutationResult<Achievement> {
    let messages = ACHIEVEMENT_TOASTS.create;
    let form = read_form(multipart, &state.config.upload)
        .await
        .map_err(|e| failed(e, messages))?;
    mutation(
        state.achievement_service.create(image_content_input(form)).await,
        messages,
    )
}

/// PUT /api/v1/dashboard/achievements/{id} - Multipart: title, description, image?
async fn update_achievement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> MutationResult<Achievement> {
    let messages = ACHIEVEMENT_TOASTS.update;
    let form = read_form(multipart, &state.config.upload)
        .await
        .map_err(|e| failed(e, messages))?;
    mutation(
        state
            .achievement_service
            .update(&id, image_content_input(form))
            .await,
        messages,
    )
}

/// DELETE /api/v1/dashboard/achievements/{id}
async fn delete_achievement(State(state): State<AppState>, Path(id): Path<String>) -> MutationResult<()> {
    acknowledge(
        state.achievement_service.delete(&id).await,
        ACHIEVEMENT_TOASTS.delete,
    )
}
