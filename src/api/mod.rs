//! API layer - HTTP handlers and routing
//!
//! This module contains every HTTP endpoint of the school site:
//! - Public HTML pages rendered through the theme engine
//! - Public JSON API under `/api/v1`
//! - Dashboard JSON API under `/api/v1/dashboard` (token protected)
//! - Static file serving from the public directory

pub mod achievements;
pub mod admin;
pub mod common;
pub mod features;
pub mod history;
pub mod middleware;
pub mod mission_vision;
pub mod notices;
pub mod pages;
pub mod responses;
pub mod results;
pub mod site;
pub mod slider;
pub mod static_files;
#[cfg(test)]
pub(crate) mod test_support;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use middleware::{ApiError, AppState, RequestStats};

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Room for one file at the size limit plus the text fields
    let body_limit = usize::try_from(state.config.upload.max_file_size)
        .unwrap_or(usize::MAX)
        .saturating_add(64 * 1024);

    // Dashboard routes (need the dashboard token)
    let dashboard_routes = Router::new()
        .merge(admin::dashboard_router())
        .merge(history::dashboard_router())
        .merge(mission_vision::dashboard_router())
        .merge(slider::dashboard_router())
        .merge(achievements::dashboard_router())
        .merge(features::dashboard_router())
        .merge(notices::dashboard_router())
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_dashboard_token,
        ))
        .layer(DefaultBodyLimit::max(body_limit));

    // Public routes
    Router::new()
        .merge(site::public_router())
        .merge(history::public_router())
        .merge(mission_vision::public_router())
        .merge(slider::public_router())
        .merge(achievements::public_router())
        .merge(features::public_router())
        .merge(notices::public_router())
        .merge(results::public_router())
        .nest("/dashboard", dashboard_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let origin = match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(e) => {
            tracing::warn!("Invalid CORS origin '{}': {}, cross-origin requests disabled", cors_origin, e);
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };
    // Credentials allow the dashboard to authenticate with the session cookie
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);

    Router::new()
        .nest("/api/v1", build_api_router(state.clone()))
        .merge(pages::router())
        // Static file serving for anything else
        .fallback(static_files::serve_static)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        // Request stats middleware (outermost layer, runs for all requests)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::request_stats_middleware,
        ))
        .with_state(state)
}
