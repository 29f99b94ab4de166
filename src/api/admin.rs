//! Dashboard maintenance endpoints
//!
//! Request statistics, cache flushing and template reloading.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState};
use crate::cache::CacheLayer;
use crate::services::Toast;

/// Response for dashboard stats
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub uptime_seconds: u64,
    pub total_requests: u64,
    pub failed_requests: u64,
    pub avg_response_time_ms: f64,
    pub cache_entries: u64,
    pub backend_url: String,
}

/// Response for maintenance actions
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub toast: Toast,
}

pub fn dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/cache/clear", post(clear_cache))
        .route("/theme/reload", post(reload_theme))
}

/// GET /api/v1/dashboard/stats
async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = &state.request_stats;
    Json(StatsResponse {
        uptime_seconds: stats.uptime_seconds(),
        total_requests: stats.total_requests(),
        failed_requests: stats.failed_requests(),
        avg_response_time_ms: stats.avg_response_time_us() / 1000.0,
        cache_entries: state.cache.entry_count(),
        backend_url: state.config.backend.api_url.clone(),
    })
}

/// POST /api/v1/dashboard/cache/clear - Drop every cached backend response
async fn clear_cache(State(state): State<AppState>) -> Result<Json<ActionResponse>, ApiError> {
    state.cache.clear().await.map_err(|e| {
        ApiError::internal_error(format!("Failed to clear cache: {}", e))
            .with_toast(Toast::error("Failed to clear cache"))
    })?;

    tracing::info!("Cache cleared from dashboard");
    Ok(Json(ActionResponse {
        toast: Toast::success("Cache cleared successfully"),
    }))
}

/// POST /api/v1/dashboard/theme/reload - Re-read template overrides from disk
async fn reload_theme(State(state): State<AppState>) -> Result<Json<ActionResponse>, ApiError> {
    let mut engine = state
        .theme_engine
        .write()
        .map_err(|_| ApiError::internal_error("Theme engine lock poisoned"))?;

    engine.reload_templates().map_err(|e| {
        tracing::warn!("Template reload failed: {}", e);
        ApiError::internal_error(format!("Failed to reload templates: {}", e))
            .with_toast(Toast::error("Failed to reload templates"))
    })?;

    Ok(Json(ActionResponse {
        toast: Toast::success("Templates reloaded successfully"),
    }))
}
