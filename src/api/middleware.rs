//! API middleware
//!
//! Contains the shared application state, the API error type, dashboard
//! token checking and request statistics.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use crate::backend::BackendStores;
use crate::cache::MemoryCache;
use crate::config::Config;
use crate::models::{Achievement, Feature};
use crate::services::{
    ContentService, HistoryService, MediaUrls, MissionVisionService, NoticeService, ResourceService,
    ResultService, ServiceError, SiteService, SliderService, Toast,
};
use crate::theme::ThemeEngine;

// ============================================================================
// Request Statistics
// ============================================================================

/// Lightweight request statistics using atomic operations (no locks)
pub struct RequestStats {
    total_requests: AtomicU64,
    /// Total response time in microseconds
    total_response_time_us: AtomicU64,
    failed_requests: AtomicU64,
    start_time: Instant,
}

impl RequestStats {
    pub fn new() -> Self {
        Self {
            total_requests: AtomicU64::new(0),
            total_response_time_us: AtomicU64::new(0),
            failed_requests: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a request with its response time
    pub fn record(&self, duration_us: u64, failed: bool) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.total_response_time_us.fetch_add(duration_us, Ordering::Relaxed);
        if failed {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    /// Requests answered with a 5xx status
    pub fn failed_requests(&self) -> u64 {
        self.failed_requests.load(Ordering::Relaxed)
    }

    pub fn avg_response_time_us(&self) -> f64 {
        let total = self.total_requests.load(Ordering::Relaxed);
        if total == 0 {
            return 0.0;
        }
        let total_time = self.total_response_time_us.load(Ordering::Relaxed);
        total_time as f64 / total as f64
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub site_service: Arc<SiteService>,
    pub history_service: Arc<HistoryService>,
    pub mission_vision_service: Arc<MissionVisionService>,
    pub slider_service: Arc<SliderService>,
    pub notice_service: Arc<NoticeService>,
    pub achievement_service: Arc<ContentService<Achievement>>,
    pub feature_service: Arc<ContentService<Feature>>,
    pub result_service: Arc<ResultService>,
    pub media: MediaUrls,
    pub cache: Arc<MemoryCache>,
    pub theme_engine: Arc<RwLock<ThemeEngine>>,
    pub request_stats: Arc<RequestStats>,
}

impl AppState {
    /// Wire every service over the given stores, sharing one cache
    pub fn new(config: Config, stores: BackendStores, cache: Arc<MemoryCache>, theme: ThemeEngine) -> Self {
        let media = MediaUrls::new(&config.backend.image_url);
        let features = ContentService::new(ResourceService::new(stores.features, cache.clone()));

        Self {
            site_service: Arc::new(SiteService::new(
                ResourceService::new(stores.info, cache.clone()),
                features.clone(),
                media.clone(),
                config.site.fallback_logo.clone(),
            )),
            history_service: Arc::new(HistoryService::new(ResourceService::new(
                stores.history,
                cache.clone(),
            ))),
            mission_vision_service: Arc::new(MissionVisionService::new(ResourceService::new(
                stores.mission_vision,
                cache.clone(),
            ))),
            slider_service: Arc::new(SliderService::new(
                ResourceService::new(stores.slider, cache.clone()),
                media.clone(),
                config.slider.clone(),
            )),
            notice_service: Arc::new(NoticeService::new(ResourceService::new(
                stores.notices,
                cache.clone(),
            ))),
            achievement_service: Arc::new(ContentService::new(ResourceService::new(
                stores.achievements,
                cache.clone(),
            ))),
            feature_service: Arc::new(features),
            result_service: Arc::new(ResultService::new(stores.results)),
            media,
            cache,
            theme_engine: Arc::new(RwLock::new(theme)),
            request_stats: Arc::new(RequestStats::new()),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
    /// Notification for the dashboard to show
    #[serde(skip_serializing_if = "Option::is_none", skip_deserializing)]
    pub toast: Option<Toast>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
            toast: None,
        }
    }

    pub fn with_toast(mut self, toast: Toast) -> Self {
        self.toast = Some(toast);
        self
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::new("BACKEND_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "BACKEND_ERROR" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::ValidationError(message) => Self::validation_error(message),
            ServiceError::NotFound(what) => Self::not_found(format!("Not found: {}", what)),
            ServiceError::Backend(e) => {
                tracing::warn!("Backend request failed: {}", e);
                Self::backend_unavailable("The content service is unavailable, please try again later")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

// ============================================================================
// Dashboard access
// ============================================================================

/// Bearer token, or the `session` cookie
fn extract_dashboard_token(request: &Request) -> Option<String> {
    if let Some(auth_header) = request.headers().get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.trim().to_string());
            }
        }
    }

    if let Some(cookie_header) = request.headers().get(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                if let Some(token) = cookie.trim().strip_prefix("session=") {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

/// Only requests carrying the configured dashboard token get through
///
/// Without a configured token the dashboard is closed.
pub async fn require_dashboard_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let expected = state
        .config
        .dashboard
        .token
        .as_deref()
        .filter(|token| !token.trim().is_empty());
    let Some(expected) = expected else {
        tracing::warn!(
            "Dashboard request to {} rejected: no dashboard token configured",
            request.uri().path()
        );
        return Err(ApiError::unauthorized("Dashboard is disabled"));
    };

    let token = extract_dashboard_token(&request)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::unauthorized("Missing dashboard token"))?;

    if !tokens_match(&token, expected) {
        return Err(ApiError::unauthorized("Invalid dashboard token"));
    }

    Ok(next.run(request).await)
}

/// Compare SHA-256 digests so the time taken does not depend on where the
/// tokens first differ
fn tokens_match(provided: &str, expected: &str) -> bool {
    let provided = Sha256::digest(provided.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    provided
        .iter()
        .zip(expected.iter())
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

/// Request statistics middleware
///
/// Records request count and response time for every request.
pub async fn request_stats_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_us = start.elapsed().as_micros() as u64;
    state
        .request_stats
        .record(duration_us, response.status().is_server_error());

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use crate::backend::BackendError;

    fn request_with_header(name: header::HeaderName, value: &str) -> Request<Body> {
        HttpRequest::builder()
            .uri("/api/v1/dashboard/stats")
            .header(name, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_extract_token_from_bearer() {
        let request = request_with_header(header::AUTHORIZATION, "Bearer secret-token");
        assert_eq!(extract_dashboard_token(&request), Some("secret-token".to_string()));
    }

    #[test]
    fn test_extract_token_from_cookie() {
        let request = request_with_header(header::COOKIE, "theme=dark; session=abc123");
        assert_eq!(extract_dashboard_token(&request), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_token_none() {
        let request = request_with_header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz");
        assert_eq!(extract_dashboard_token(&request), None);
    }

    #[test]
    fn test_tokens_match() {
        assert!(tokens_match("secret-token", "secret-token"));
        assert!(!tokens_match("secret-tokem", "secret-token"));
        assert!(!tokens_match("secret", "secret-token"));
        assert!(!tokens_match("", "secret-token"));
    }

    #[test]
    fn test_service_error_mapping() {
        let err: ApiError = ServiceError::ValidationError("Title is required".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error.message, "Title is required");

        let err: ApiError = ServiceError::NotFound("achievements a1".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError = ServiceError::Backend(BackendError::Status {
            path: "/slider".into(),
            status: 500,
            message: "boom".into(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert!(!err.error.message.contains("boom"));
    }

    #[test]
    fn test_error_body_shape() {
        let err = ApiError::validation_error("Image is required")
            .with_toast(Toast::error("Failed to add slide"));
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["toast"]["variant"], "destructive");
        assert!(json["error"].get("details").is_none());
    }

    #[test]
    fn test_request_stats() {
        let stats = RequestStats::new();
        assert_eq!(stats.avg_response_time_us(), 0.0);

        stats.record(100, false);
        stats.record(300, true);

        assert_eq!(stats.total_requests(), 2);
        assert_eq!(stats.failed_requests(), 1);
        assert_eq!(stats.avg_response_time_us(), 200.0);
    }
}
