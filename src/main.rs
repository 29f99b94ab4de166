//! Schoolsite - public website and administrative dashboard for a school

use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schoolsite::{
    api::{self, AppState},
    backend::{BackendClient, BackendStores, ResultApiClient},
    cache::create_cache,
    config::Config,
    theme::ThemeEngine,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schoolsite=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting school site...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    config.validate()?;
    tracing::info!("Configuration loaded");

    // Remote services
    let backend = BackendClient::new(&config.backend)?;
    let results = ResultApiClient::new(
        &config.result_api,
        Duration::from_secs(config.backend.timeout_seconds),
    )?;
    tracing::info!(
        "Backend at {}, result service at {} (school code {})",
        backend.base_url(),
        config.result_api.base_url,
        results.school_code()
    );
    let stores = BackendStores::http(&backend, results);

    // Cache
    let cache = create_cache(&config.cache);
    tracing::info!("Cache initialized (ttl {}s)", config.cache.ttl_seconds);

    // Templates
    let theme_engine = ThemeEngine::new(config.theme.path.as_deref())?;
    match theme_engine.override_path() {
        Some(path) => tracing::info!("Template overrides loaded from {}", path.display()),
        None => tracing::info!("Using built-in templates"),
    }

    if config.dashboard.token.is_none() {
        tracing::warn!("No dashboard token configured, the dashboard API is disabled");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let cors_origin = config.server.cors_origin.clone();

    let state = AppState::new(config, stores, cache, theme_engine);
    let app = api::build_router(state, &cors_origin);

    // Start server
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
