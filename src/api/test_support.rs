//! Router test harness over in-memory stores

use async_trait::async_trait;
use axum_test::TestServer;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{build_router, AppState};
use crate::backend::memory::MemoryStore;
use crate::backend::{BackendError, BackendStores, Result as BackendResult, ResultSource};
use crate::cache::MemoryCache;
use crate::config::Config;
use crate::models::{
    Achievement, Feature, HeaderData, HistoryData, MissionVisionItem, Notice, SchoolResultInfo,
    SliderData, StudentResultQuery, SubjectResult,
};
use crate::theme::ThemeEngine;

pub const TOKEN: &str = "test-dashboard-token";

/// Result source answering from fixed rows and recording queries
#[derive(Default)]
pub struct StubResults {
    pub rows: Vec<SubjectResult>,
    pub queries: Mutex<Vec<StudentResultQuery>>,
    pub failing: bool,
}

#[async_trait]
impl ResultSource for StubResults {
    async fn school_info(&self) -> BackendResult<SchoolResultInfo> {
        if self.failing {
            return Err(unavailable("/api/schoolInfo-for-result"));
        }
        Ok(SchoolResultInfo {
            classes: vec!["Six".into(), "Ten".into()],
            sections: vec!["A".into()],
            academic_years: vec!["2024".into()],
            exam_names: vec!["annual".into()],
        })
    }

    async fn student_result(&self, query: &StudentResultQuery) -> BackendResult<Vec<SubjectResult>> {
        if self.failing {
            return Err(unavailable("/api/student-result"));
        }
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.rows.clone())
    }
}

fn unavailable(path: &str) -> BackendError {
    BackendError::Status {
        path: path.into(),
        status: 503,
        message: "maintenance".into(),
    }
}

/// Handles on every store behind a test server
pub struct TestStores {
    pub info: Arc<MemoryStore<HeaderData>>,
    pub history: Arc<MemoryStore<HistoryData>>,
    pub mission_vision: Arc<MemoryStore<MissionVisionItem>>,
    pub slider: Arc<MemoryStore<SliderData>>,
    pub features: Arc<MemoryStore<Feature>>,
    pub notices: Arc<MemoryStore<Notice>>,
    pub achievements: Arc<MemoryStore<Achievement>>,
    pub results: Arc<StubResults>,
}

impl TestStores {
    pub fn empty() -> Self {
        Self::with_results(StubResults::default())
    }

    pub fn with_results(results: StubResults) -> Self {
        Self {
            info: MemoryStore::shared("/info", vec![]),
            history: MemoryStore::shared("/history", vec![]),
            mission_vision: MemoryStore::shared("/mission-vision", vec![]),
            slider: MemoryStore::shared("/slider", vec![]),
            features: MemoryStore::shared("/features", vec![]),
            notices: MemoryStore::shared("/notice", vec![]),
            achievements: MemoryStore::shared("/achievements", vec![]),
            results: Arc::new(results),
        }
    }

    fn backend(&self) -> BackendStores {
        BackendStores {
            info: self.info.clone(),
            history: self.history.clone(),
            mission_vision: self.mission_vision.clone(),
            slider: self.slider.clone(),
            features: self.features.clone(),
            notices: self.notices.clone(),
            achievements: self.achievements.clone(),
            results: self.results.clone(),
        }
    }
}

pub fn test_config(dashboard_token: Option<&str>) -> Config {
    let mut config = Config::default();
    config.backend.image_url = "http://images.test".to_string();
    config.site.school_name = "Test High School".to_string();
    config.site.public_dir = PathBuf::from("public");
    config.dashboard.token = dashboard_token.map(str::to_string);
    config
}

pub fn test_state(stores: &TestStores, config: Config) -> AppState {
    let theme = ThemeEngine::new(None).unwrap();
    AppState::new(config, stores.backend(), Arc::new(MemoryCache::new()), theme)
}

/// Server with the dashboard token configured
pub fn test_server(stores: &TestStores) -> TestServer {
    server_with_config(stores, test_config(Some(TOKEN)))
}

pub fn server_with_config(stores: &TestStores, config: Config) -> TestServer {
    let cors_origin = config.server.cors_origin.clone();
    let state = test_state(stores, config);
    TestServer::new(build_router(state, &cors_origin)).unwrap()
}
