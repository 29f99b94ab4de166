//! Home page slider API endpoints

use axum::{
    extract::{Multipart, Path, State},
    routing::{get, put},
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{acknowledge, failed, mutation, MutationResult};
use crate::api::upload::{read_form, UploadedForm};
use crate::models::{SlideInput, SlideStatus, SliderData, SliderView};
use crate::services::{ToastMessages, SLIDER_TOASTS};

pub fn public_router() -> Router<AppState> {
    Router::new().route("/slider", get(get_slider))
}

pub fn dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/slider", get(list_slides).post(create_slide))
        .route("/slider/{id}", put(update_slide).delete(delete_slide))
}

/// GET /api/v1/slider - Images to rotate and the rotation timing
///
/// Never fails: the fallback images stand in for a missing backend.
async fn get_slider(State(state): State<AppState>) -> Json<SliderView> {
    Json(state.slider_service.view().await)
}

/// GET /api/v1/dashboard/slider - Every slide, whatever its status
async fn list_slides(State(state): State<AppState>) -> Result<Json<Vec<SliderData>>, ApiError> {
    Ok(Json(state.slider_service.list().await?))
}

/// POST /api/v1/dashboard/slider - Multipart: image, status?
async fn create_slide(State(state): State<AppState>, multipart: Multipart) -> MutationResult<SliderData> {
    let messages = SLIDER_TOASTS.create;
    let input = slide_input(&state, multipart, messages).await?;
    mutation(state.slider_service.create(input).await, messages)
}

/// PUT /api/v1/dashboard/slider/{id} - Multipart: image?, status?
async fn update_slide(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> MutationResult<SliderData> {
    let messages = SLIDER_TOASTS.update;
    let input = slide_input(&state, multipart, messages).await?;
    mutation(state.slider_service.update(&id, input).await, messages)
}

/// DELETE /api/v1/dashboard/slider/{id}
async fn delete_slide(State(state): State<AppState>, Path(id): Path<String>) -> MutationResult<()> {
    acknowledge(state.slider_service.delete(&id).await, SLIDER_TOASTS.delete)
}

async fn slide_input(
    state: &AppState,
    multipart: Multipart,
    messages: ToastMessages,
) -> Result<SlideInput, ApiError> {
    let form = read_form(multipart, &state.config.upload)
        .await
        .map_err(|e| failed(e, messages))?;
    parse_slide_form(form).map_err(|e| failed(e, messages))
}

fn parse_slide_form(mut form: UploadedForm) -> Result<SlideInput, ApiError> {
    let status = form
        .optional_text("status")
        .map(str::parse::<SlideStatus>)
        .transpose()
        .map_err(|e| ApiError::validation_error(e.to_string()))?;

    Ok(SlideInput {
        status,
        image: form.take_file("image"),
    })
}
