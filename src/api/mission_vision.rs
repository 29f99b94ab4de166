//! Mission and vision API endpoints
//!
//! Items are edited as JSON. The `type` of the request decides which fields
//! are kept.

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::common::MissionVisionQuery;
use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{acknowledge, mutation, MutationResult};
use crate::models::{MissionVisionInput, MissionVisionItem, MissionVisionType};
use crate::services::MISSION_VISION_TOASTS;

/// Create/update body
#[derive(Debug, Deserialize)]
pub struct MissionVisionRequest {
    #[serde(rename = "type")]
    pub kind: MissionVisionType,
    #[serde(flatten)]
    pub input: MissionVisionInput,
}

/// A vision card ready for display
#[derive(Debug, Serialize)]
pub struct VisionCard {
    pub id: Option<String>,
    pub icon: Option<String>,
    pub title: String,
    pub description: String,
}

/// A mission block ready for display
#[derive(Debug, Serialize)]
pub struct MissionBlock {
    pub id: Option<String>,
    pub description: String,
    pub points: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MissionVisionResponse {
    pub mission: Vec<MissionBlock>,
    pub vision: Vec<VisionCard>,
}

pub fn public_router() -> Router<AppState> {
    Router::new().route("/mission-vision", get(get_sections))
}

pub fn dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/mission-vision", get(list_items).post(create_item))
        .route("/mission-vision/{id}", put(update_item).delete(delete_item))
}

/// GET /api/v1/mission-vision - Both tabs with display defaults applied
async fn get_sections(State(state): State<AppState>) -> Result<Json<MissionVisionResponse>, ApiError> {
    let sections = state.mission_vision_service.sections().await?;

    Ok(Json(MissionVisionResponse {
        mission: sections
            .mission
            .into_iter()
            .map(|item| MissionBlock {
                description: item.display_description().to_string(),
                id: item.id,
                points: item.points,
            })
            .collect(),
        vision: sections
            .vision
            .into_iter()
            .map(|item| VisionCard {
                icon: item.vision_icon().map(|icon| icon.slug().to_string()),
                title: item.display_title().to_string(),
                description: item.display_description().to_string(),
                id: item.id,
            })
            .collect(),
    }))
}

/// GET /api/v1/dashboard/mission-vision?type=
async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<MissionVisionQuery>,
) -> Result<Json<Vec<MissionVisionItem>>, ApiError> {
    let items = match query.kind {
        Some(kind) => state.mission_vision_service.list_by_type(kind).await?,
        None => state.mission_vision_service.list().await?,
    };
    Ok(Json(items))
}

/// POST /api/v1/dashboard/mission-vision
async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<MissionVisionRequest>,
) -> MutationResult<MissionVisionItem> {
    mutation(
        state
            .mission_vision_service
            .create(request.kind, request.input)
            .await,
        MISSION_VISION_TOASTS.create,
    )
}

/// PUT /api/v1/dashboard/mission-vision/{id}
async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MissionVisionRequest>,
) -> MutationResult<MissionVisionItem> {
    mutation(
        state
            .mission_vision_service
            .update(&id, request.kind, request.input)
            .await,
        MISSION_VISION_TOASTS.update,
    )
}

/// DELETE /api/v1/dashboard/mission-vision/{id}
async fn delete_item(State(state): State<AppState>, Path(id): Path<String>) -> MutationResult<()> {
    acknowledge(
        state.mission_vision_service.delete(&id).await,
        MISSION_VISION_TOASTS.delete,
    )
}
