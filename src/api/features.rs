//! Home page feature API endpoints

use axum::{
    extract::{Multipart, Path, State},
    routing::{get, put},
    Json, Router,
};

use crate::api::common::image_content_input;
use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{acknowledge, failed, mutation, MutationResult};
use crate::api::upload::read_form;
use crate::models::{Feature, FeatureHighlight};
use crate::services::FEATURE_TOASTS;

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/features", get(list_features))
        .route("/features/highlight", get(get_highlight))
}

pub fn dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/features", get(list_features).post(create_feature))
        .route("/features/{id}", put(update_feature).delete(delete_feature))
}

/// GET /api/v1/features
async fn list_features(State(state): State<AppState>) -> Result<Json<Vec<Feature>>, ApiError> {
    Ok(Json(state.feature_service.list().await?))
}

/// GET /api/v1/features/highlight - First feature as shown on the home page
async fn get_highlight(State(state): State<AppState>) -> Result<Json<FeatureHighlight>, ApiError> {
    state
        .site_service
        .highlight()
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No feature to highlight"))
}

/// POST /api/v1/dashboard/features - Multipart: title, description, image
async fn create_feature(State(state): State<AppState>, multipart: Multipart) -> MutationResult<Feature> {
    let messages = FEATURE_TOASTS.create;
    let form = read_form(multipart, &state.config.upload)
        .await
        .map_err(|e| failed(e, messages))?;
    mutation(state.feature_service.create(image_content_input(form)).await, messages)
}

/// PUT /api/v1/dashboard/features/{id} - Multipart: title, description, image?
async fn update_feature(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> MutationResult<Feature> {
    let messages = FEATURE_TOASTS.update;
    let form = read_form(multipart, &state.config.upload)
        .await
        .map_err(|e| failed(e, messages))?;
    mutation(
        state.feature_service.update(&id, image_content_input(form)).await,
        messages,
    )
}

/// DELETE /api/v1/dashboard/features/{id}
async fn delete_feature(State(state): State<AppState>, Path(id): Path<String>) -> MutationResult<()> {
    acknowledge(state.feature_service.delete(&id).await, FEATURE_TOASTS.delete)
}
