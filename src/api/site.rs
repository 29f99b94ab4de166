//! Site identity API endpoints
//!
//! The header block (logo, school name, contact details) and the fixed
//! navigation shared by every page.

use axum::{extract::State, routing::get, Json, Router};

use crate::api::middleware::{ApiError, AppState};
use crate::models::{navigation, HeaderView, Navigation};

/// Build the public site router
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/header", get(get_header))
        .route("/navigation", get(get_navigation))
}

/// GET /api/v1/header - School identity for the page header
async fn get_header(State(state): State<AppState>) -> Result<Json<HeaderView>, ApiError> {
    let header = state
        .site_service
        .header_view(&state.config.site.school_name)
        .await?;
    Ok(Json(header))
}

/// GET /api/v1/navigation - Menu, about topics and header actions
async fn get_navigation() -> Json<&'static Navigation> {
    Json(navigation())
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use crate::backend::memory::MemoryStore;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_header_resolves_logo() {
        let mut stores = TestStores::empty();
        stores.info = MemoryStore::shared(
            "/info",
            vec![json!({
                "_id": "i1",
                "logo": "uploads/logo.png",
                "school_name": "Rajshahi Model School",
                "address": "Rajshahi",
                "eiin": 126543
            })],
        );
        let server = test_server(&stores);

        let response = server.get("/api/v1/header").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["logo_url"], "http://images.test/uploads/logo.png");
        assert_eq!(body["school_name"], "Rajshahi Model School");
        assert_eq!(body["eiin"], 126543);
    }

    #[tokio::test]
    async fn test_header_without_record_uses_fallbacks() {
        let stores = TestStores::empty();
        let server = test_server(&stores);

        let body: Value = server.get("/api/v1/header").await.json();
        assert_eq!(body["school_name"], "Test High School");
        assert!(body["logo_url"].as_str().unwrap().starts_with("http://images.test/"));
    }

    #[tokio::test]
    async fn test_header_backend_failure_is_bad_gateway() {
        let stores = TestStores::empty();
        stores.info.set_failing(true);
        let server = test_server(&stores);

        let response = server.get("/api/v1/header").await;
        response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "BACKEND_ERROR");
    }

    #[tokio::test]
    async fn test_navigation() {
        let stores = TestStores::empty();
        let server = test_server(&stores);

        let body: Value = server.get("/api/v1/navigation").await.json();
        assert_eq!(body["about_topics"].as_array().unwrap().len(), 7);
        assert_eq!(body["actions"][0]["href"], "/login");
    }
}
