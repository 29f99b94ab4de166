//! Public HTML pages rendered through the theme engine
//!
//! A page whose data cannot be fetched still renders, with an error banner
//! in place of the missing content.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tera::Context as TeraContext;

use crate::api::common::{MissionVisionQuery, SlideQuery};
use crate::api::middleware::AppState;
use crate::models::{MissionVisionType, StudentResultQuery};
use crate::services::{ServiceError, SlideTiming, SliderRotation};
use crate::theme::StandardTemplateVars;

const LOAD_ERROR: &str = "Failed to load data. Please try again later.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home_page))
        .route("/about/history", get(history_page))
        .route("/about/mission-vision", get(mission_vision_page))
        .route("/about/achievements/{id}", get(achievement_page))
        .route("/academic/academic-calendar", get(calendar_page))
        .route("/notice", get(notice_page))
        .route("/result/individual", get(result_page))
}

/// Template plus the data gathered for it
struct Page {
    template: &'static str,
    path: String,
    context: TeraContext,
    error_message: Option<String>,
    status: StatusCode,
}

impl Page {
    fn new(template: &'static str, path: impl Into<String>) -> Self {
        Self {
            template,
            path: path.into(),
            context: TeraContext::new(),
            error_message: None,
            status: StatusCode::OK,
        }
    }

    fn insert<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        self.context.insert(key, value);
        self
    }

    /// Show the banner; not-found errors also set the status
    fn failed(mut self, error: &ServiceError) -> Self {
        match error {
            ServiceError::NotFound(_) => {
                self.status = StatusCode::NOT_FOUND;
                self.error_message = Some("The requested page was not found.".to_string());
            }
            ServiceError::ValidationError(message) => {
                self.error_message = Some(message.clone());
            }
            ServiceError::Backend(e) => {
                tracing::warn!("Failed to load data for {}: {}", self.path, e);
                self.error_message = Some(LOAD_ERROR.to_string());
            }
        }
        self
    }

    async fn render(mut self, state: &AppState) -> Response {
        let site_name = &state.config.site.school_name;
        let mut vars = StandardTemplateVars::new(site_name.as_str(), self.path.as_str());
        match state.site_service.header_view(site_name).await {
            Ok(header) => vars = vars.with_header(header),
            Err(e) => tracing::warn!("Failed to load header: {}", e),
        }

        self.context.insert("error_message", &self.error_message);

        let html = match state.theme_engine.read() {
            Ok(engine) => engine.render_with_fallback(self.template, &self.context, &vars),
            Err(_) => {
                tracing::error!("Theme engine lock poisoned");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };
        (self.status, Html(html)).into_response()
    }
}

/// `2024-03-01T10:00:00Z` as `01 March 2024`
fn display_date(date: Option<DateTime<Utc>>) -> Option<String> {
    date.map(|d| d.format("%d %B %Y").to_string())
}

/// GET / - Slider and the highlighted feature
async fn home_page(State(state): State<AppState>, Query(query): Query<SlideQuery>) -> Response {
    let slider = state.slider_service.view().await;
    let now = Instant::now();
    let mut rotation = SliderRotation::new(
        slider.images.len(),
        SlideTiming::from(&state.config.slider),
        now,
    );
    if let Some(slide) = query.slide {
        rotation.go_to(slide, now);
    }
    let current = rotation.current().unwrap_or(0);
    let previous = rotation.peek_previous().unwrap_or(0);
    let next = rotation.peek_next().unwrap_or(0);

    let mut page = Page::new("home.html", "/")
        .insert("current_slide", &current)
        .insert("previous_slide", &previous)
        .insert("next_slide", &next)
        .insert("current_image", &slider.images.get(current))
        .insert("slider", &slider);

    page = match state.site_service.highlight().await {
        Ok(feature) => page.insert("feature", &feature),
        Err(e) => page.insert("feature", &None::<()>).failed(&e),
    };
    page.render(&state).await
}

#[derive(Serialize)]
struct HistoryContext {
    title: String,
    image_url: Option<String>,
    description: String,
}

/// GET /about/history
async fn history_page(State(state): State<AppState>) -> Response {
    let page = Page::new("history.html", "/about/history");
    let page = match state.history_service.current().await {
        Ok(history) => {
            let history = history.map(|h| HistoryContext {
                image_url: (!h.image.trim().is_empty()).then(|| state.media.image_url(&h.image)),
                title: h.title,
                description: h.description,
            });
            page.insert("history", &history)
        }
        Err(e) => page.insert("history", &None::<()>).failed(&e),
    };
    page.render(&state).await
}

#[derive(Serialize)]
struct MissionContext {
    description: String,
    points: Vec<String>,
}

#[derive(Serialize)]
struct VisionContext {
    icon: Option<&'static str>,
    title: String,
    description: String,
}

/// GET /about/mission-vision - Both tabs; `?type=` shows only one
async fn mission_vision_page(
    State(state): State<AppState>,
    Query(query): Query<MissionVisionQuery>,
) -> Response {
    let page = Page::new("mission_vision.html", "/about/mission-vision");
    let page = match state.mission_vision_service.sections().await {
        Ok(sections) => {
            let show = |kind| query.kind.map_or(true, |selected| selected == kind);
            let mission: Vec<MissionContext> = if show(MissionVisionType::Mission) {
                sections
                    .mission
                    .iter()
                    .map(|item| MissionContext {
                        description: item.display_description().to_string(),
                        points: item.points.clone(),
                    })
                    .collect()
            } else {
                Vec::new()
            };
            let vision: Vec<VisionContext> = if show(MissionVisionType::Vision) {
                sections
                    .vision
                    .iter()
                    .map(|item| VisionContext {
                        icon: item.vision_icon().map(|icon| icon.slug()),
                        title: item.display_title().to_string(),
                        description: item.display_description().to_string(),
                    })
                    .collect()
            } else {
                Vec::new()
            };
            page.insert("mission", &mission).insert("vision", &vision)
        }
        Err(e) => page
            .insert("mission", &Vec::<()>::new())
            .insert("vision", &Vec::<()>::new())
            .failed(&e),
    };
    page.render(&state).await
}

#[derive(Serialize)]
struct AchievementContext {
    title: String,
    created: Option<String>,
    image_url: Option<String>,
    description: String,
}

/// GET /about/achievements/{id}
async fn achievement_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let page = Page::new("achievement.html", format!("/about/achievements/{}", id));
    let page = match state.achievement_service.require(&id).await {
        Ok(achievement) => page.insert(
            "achievement",
            &AchievementContext {
                created: display_date(achievement.created_at),
                image_url: (!achievement.image.trim().is_empty())
                    .then(|| state.media.image_url(&achievement.image)),
                title: achievement.title,
                description: achievement.description,
            },
        ),
        Err(e) => page.insert("achievement", &None::<()>).failed(&e),
    };
    page.render(&state).await
}

/// GET /academic/academic-calendar
async fn calendar_page(State(state): State<AppState>) -> Response {
    Page::new("calendar.html", "/academic/academic-calendar")
        .insert("calendar_image", &state.config.site.calendar_image)
        .render(&state)
        .await
}

#[derive(Serialize)]
struct NoticeContext {
    title: String,
    published: Option<String>,
    pdf_url: Option<String>,
}

/// GET /notice
async fn notice_page(State(state): State<AppState>) -> Response {
    let page = Page::new("notices.html", "/notice");
    let page = match state.notice_service.list().await {
        Ok(notices) => {
            let notices: Vec<NoticeContext> = notices
                .into_iter()
                .map(|notice| NoticeContext {
                    published: display_date(notice.created_at),
                    pdf_url: notice
                        .pdf_url
                        .filter(|url| !url.trim().is_empty())
                        .map(|url| state.media.image_url(&url)),
                    title: notice.title,
                })
                .collect();
            page.insert("notices", &notices)
        }
        Err(e) => page.insert("notices", &Vec::<()>::new()).failed(&e),
    };
    page.render(&state).await
}

/// GET /result/individual - Search form, and the result once all fields are given
async fn result_page(State(state): State<AppState>, Query(query): Query<StudentResultQuery>) -> Response {
    let mut page = Page::new("result.html", "/result/individual").insert("query", &query);

    page = match state.result_service.school_info().await {
        Ok(info) => page.insert("school_info", &info),
        Err(e) => page
            .insert("school_info", &crate::models::SchoolResultInfo::default())
            .failed(&e),
    };

    let searched = query.is_complete();
    page = page.insert("searched", &searched);
    page = if searched {
        match state.result_service.lookup(&query).await {
            Ok(result) => page.insert("result", &result),
            Err(e) => page.insert("result", &None::<()>).failed(&e),
        }
    } else {
        page.insert("result", &None::<()>)
    };
    page.render(&state).await
}

#[cfg(test)]
mod tests {
    use super::display_date;
    use crate::api::test_support::*;
    use crate::backend::memory::MemoryStore;
    use crate::models::SubjectResult;
    use axum::http::StatusCode;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_display_date() {
        let date = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(display_date(Some(date)).as_deref(), Some("01 March 2024"));
        assert_eq!(display_date(None), None);
    }

    #[tokio::test]
    async fn test_home_page_uses_fallback_slides() {
        let stores = TestStores::empty();
        let server = test_server(&stores);

        let response = server.get("/").await;
        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("&#x2F;slider&#x2F;1.jpg"));
        assert!(html.contains("Test High School"));
        assert!(html.contains("/?slide=2"));
    }

    #[tokio::test]
    async fn test_home_page_slide_links_wrap() {
        let stores = TestStores::empty();
        let server = test_server(&stores);

        let html = server.get("/").add_query_param("slide", "2").await.text();
        assert!(html.contains(r#"alt="slide 3""#));
        assert!(html.contains(r#"<a href="/?slide=1" aria-label="Previous slide">"#));
        assert!(html.contains(r#"<a href="/?slide=0" aria-label="Next slide">"#));

        let html = server.get("/").add_query_param("slide", "9").await.text();
        assert!(html.contains(r#"alt="slide 1""#));
        assert!(html.contains(r#"<a href="/?slide=2" aria-label="Previous slide">"#));
    }

    #[tokio::test]
    async fn test_home_page_selected_slide() {
        let mut stores = TestStores::empty();
        stores.slider = MemoryStore::shared(
            "/slider",
            vec![
                json!({ "_id": "s1", "image": "uploads/one.jpg", "status": "active" }),
                json!({ "_id": "s2", "image": "uploads/two.jpg", "status": "active" }),
            ],
        );
        stores.features = MemoryStore::shared(
            "/features",
            vec![json!({ "_id": "f1", "title": "Labs", "description": "Modern labs", "image": "uploads/lab.jpg" })],
        );
        let server = test_server(&stores);

        let html = server.get("/").add_query_param("slide", "1").await.text();
        assert!(html.contains("images.test&#x2F;uploads&#x2F;two.jpg"));
        assert!(html.contains("Modern labs..."));
    }

    #[tokio::test]
    async fn test_history_page_failure_shows_banner() {
        let stores = TestStores::empty();
        stores.history.set_failing(true);
        let server = test_server(&stores);

        let response = server.get("/about/history").await;
        response.assert_status_ok();
        assert!(response.text().contains("Failed to load data. Please try again later."));
    }

    #[tokio::test]
    async fn test_mission_vision_page() {
        let mut stores = TestStores::empty();
        stores.mission_vision = MemoryStore::shared(
            "/mission-vision",
            vec![
                json!({ "_id": "m1", "type": "mission", "mainDescription": "Educate all", "points": ["Read"] }),
                json!({ "_id": "v1", "type": "vision", "title": "Light", "icon": "Eye" }),
            ],
        );
        let server = test_server(&stores);

        let html = server.get("/about/mission-vision").await.text();
        assert!(html.contains("Educate all"));
        assert!(html.contains("icon-eye"));
        assert!(html.contains("No description"));

        let html = server
            .get("/about/mission-vision")
            .add_query_param("type", "vision")
            .await
            .text();
        assert!(!html.contains("Educate all"));
    }

    #[tokio::test]
    async fn test_missing_achievement_is_not_found() {
        let stores = TestStores::empty();
        let server = test_server(&stores);

        let response = server.get("/about/achievements/nope").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("The requested page was not found."));
    }

    #[tokio::test]
    async fn test_notice_page_lists_notices() {
        let mut stores = TestStores::empty();
        stores.notices = MemoryStore::shared(
            "/notice",
            vec![json!({
                "_id": "n1",
                "title": "Exam routine",
                "pdfUrl": "uploads/routine.pdf",
                "createdAt": "2024-03-01T10:00:00Z"
            })],
        );
        let server = test_server(&stores);

        let html = server.get("/notice").await.text();
        assert!(html.contains("Exam routine"));
        assert!(html.contains("01 March 2024"));
        assert!(html.contains("images.test&#x2F;uploads&#x2F;routine.pdf"));
    }

    #[tokio::test]
    async fn test_result_page_search() {
        let stores = TestStores::with_results(StubResults {
            rows: vec![SubjectResult {
                name: "Karim".into(),
                subject: "Math".into(),
                total_marks: "95".into(),
                gpa: "5.00".into(),
                ..Default::default()
            }],
            ..Default::default()
        });
        let server = test_server(&stores);

        let html = server.get("/result/individual").await.text();
        assert!(html.contains("Select exam"));
        assert!(!html.contains("Karim"));

        let html = server
            .get("/result/individual")
            .add_query_param("student_id", "1001")
            .add_query_param("exam_name", "annual")
            .add_query_param("year", "2024")
            .await
            .text();
        assert!(html.contains("Karim"));
        assert!(html.contains("A+"));
    }

    #[tokio::test]
    async fn test_calendar_page() {
        let stores = TestStores::empty();
        let server = test_server(&stores);

        let response = server.get("/academic/academic-calendar").await;
        response.assert_status_ok();
        assert!(response.text().contains("Academic calendar"));
    }
}
