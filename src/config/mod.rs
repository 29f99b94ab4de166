//! Configuration management
//!
//! This module handles loading and parsing configuration for the school site.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote REST backend configuration
    #[serde(default)]
    pub backend: BackendConfig,
    /// Third-party result API configuration
    #[serde(default)]
    pub result_api: ResultApiConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Template override configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Site identity and static files
    #[serde(default)]
    pub site: SiteConfig,
    /// Home page slider configuration
    #[serde(default)]
    pub slider: SliderConfig,
    /// Upload configuration
    #[serde(default)]
    pub upload: UploadConfig,
    /// Dashboard access configuration
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Remote REST backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the REST API (resources are appended, e.g. `/history`)
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base URL that backend-relative image paths are joined to
    #[serde(default = "default_image_url")]
    pub image_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Bearer token attached to every backend request
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            image_url: default_image_url(),
            timeout_seconds: default_timeout_seconds(),
            token: None,
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:5000/api/v1".to_string()
}

fn default_image_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Third-party result API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultApiConfig {
    /// Base URL of the result service
    #[serde(default = "default_result_api_url")]
    pub base_url: String,
    /// Institution code sent with every result query
    #[serde(default = "default_school_code")]
    pub school_code: u32,
}

impl Default for ResultApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_result_api_url(),
            school_code: default_school_code(),
        }
    }
}

fn default_result_api_url() -> String {
    "https://academichelperbd.com".to_string()
}

fn default_school_code() -> u32 {
    10120
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache TTL in seconds
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// Maximum number of cached queries
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            max_capacity: default_max_capacity(),
        }
    }
}

fn default_ttl() -> u64 {
    60
}

fn default_max_capacity() -> u64 {
    1_000
}

/// Template override configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Directory whose `.html` files replace the built-in templates
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Site identity and static files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Institution name used in page titles
    #[serde(default = "default_school_name")]
    pub school_name: String,
    /// Logo path used when the backend has no header record
    #[serde(default = "default_fallback_logo")]
    pub fallback_logo: String,
    /// Directory served for unmatched paths (slider fallbacks, calendar image)
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
    /// Academic calendar image (site-local path)
    #[serde(default = "default_calendar_image")]
    pub calendar_image: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            school_name: default_school_name(),
            fallback_logo: default_fallback_logo(),
            public_dir: default_public_dir(),
            calendar_image: default_calendar_image(),
        }
    }
}

fn default_school_name() -> String {
    "Beanibazar Ideal Madrasah".to_string()
}

fn default_fallback_logo() -> String {
    "logo/logo.jpg".to_string()
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_calendar_image() -> String {
    "/acd.jpg".to_string()
}

/// Home page slider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Auto-advance interval in milliseconds
    #[serde(default = "default_auto_slide_interval_ms")]
    pub auto_slide_interval_ms: u64,
    /// How long rotation stays paused after a user interaction
    #[serde(default = "default_interaction_pause_ms")]
    pub interaction_pause_ms: u64,
    /// Site-local images shown when the backend has no active slide
    #[serde(default = "default_fallback_images")]
    pub fallback_images: Vec<String>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            auto_slide_interval_ms: default_auto_slide_interval_ms(),
            interaction_pause_ms: default_interaction_pause_ms(),
            fallback_images: default_fallback_images(),
        }
    }
}

fn default_auto_slide_interval_ms() -> u64 {
    5_000
}

fn default_interaction_pause_ms() -> u64 {
    10_000
}

fn default_fallback_images() -> Vec<String> {
    vec![
        "/slider/1.jpg".to_string(),
        "/slider/2.jpg".to_string(),
        "/slider/3.jpg".to_string(),
    ]
}

/// Upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum file size in bytes (default: 10MB)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allowed MIME types
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            allowed_types: default_allowed_types(),
        }
    }
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

fn default_allowed_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/gif".to_string(),
        "image/webp".to_string(),
        "image/svg+xml".to_string(),
        "application/pdf".to_string(),
    ]
}

impl UploadConfig {
    /// Check if a MIME type is allowed
    pub fn is_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == mime_type)
    }
}

/// Dashboard access configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Token required on every dashboard request. Unset disables the dashboard.
    #[serde(default)]
    pub token: Option<String>,
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            })?;

        // Blank tokens count as unset
        config.backend.token = non_blank(config.backend.token.take());
        config.dashboard.token = non_blank(config.dashboard.token.take());

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - SCHOOLSITE_SERVER_HOST / _PORT / _CORS_ORIGIN
    /// - SCHOOLSITE_BACKEND_URL, SCHOOLSITE_IMAGE_URL, SCHOOLSITE_BACKEND_TOKEN
    /// - SCHOOLSITE_BACKEND_TIMEOUT_SECONDS
    /// - SCHOOLSITE_RESULT_API_URL, SCHOOLSITE_SCHOOL_CODE
    /// - SCHOOLSITE_CACHE_TTL_SECONDS
    /// - SCHOOLSITE_THEME_PATH, SCHOOLSITE_PUBLIC_DIR
    /// - SCHOOLSITE_DASHBOARD_TOKEN
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("SCHOOLSITE_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SCHOOLSITE_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("SCHOOLSITE_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        if let Ok(url) = std::env::var("SCHOOLSITE_BACKEND_URL") {
            self.backend.api_url = url;
        }
        if let Ok(url) = std::env::var("SCHOOLSITE_IMAGE_URL") {
            self.backend.image_url = url;
        }
        if let Ok(token) = std::env::var("SCHOOLSITE_BACKEND_TOKEN") {
            if !token.trim().is_empty() {
                self.backend.token = Some(token);
            }
        }
        if let Ok(timeout) = std::env::var("SCHOOLSITE_BACKEND_TIMEOUT_SECONDS") {
            if let Ok(timeout) = timeout.parse::<u64>() {
                self.backend.timeout_seconds = timeout;
            }
        }

        if let Ok(url) = std::env::var("SCHOOLSITE_RESULT_API_URL") {
            self.result_api.base_url = url;
        }
        if let Ok(code) = std::env::var("SCHOOLSITE_SCHOOL_CODE") {
            if let Ok(code) = code.parse::<u32>() {
                self.result_api.school_code = code;
            }
        }

        if let Ok(ttl) = std::env::var("SCHOOLSITE_CACHE_TTL_SECONDS") {
            if let Ok(ttl) = ttl.parse::<u64>() {
                self.cache.ttl_seconds = ttl;
            }
        }

        if let Ok(path) = std::env::var("SCHOOLSITE_THEME_PATH") {
            self.theme.path = Some(PathBuf::from(path));
        }
        if let Ok(dir) = std::env::var("SCHOOLSITE_PUBLIC_DIR") {
            self.site.public_dir = PathBuf::from(dir);
        }

        if let Ok(token) = std::env::var("SCHOOLSITE_DASHBOARD_TOKEN") {
            if !token.trim().is_empty() {
                self.dashboard.token = Some(token);
            }
        }
    }

    /// Reject configurations the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("backend.api_url", &self.backend.api_url),
            ("backend.image_url", &self.backend.image_url),
            ("result_api.base_url", &self.result_api.base_url),
        ] {
            reqwest::Url::parse(url).map_err(|e| {
                ConfigError::ValidationError(format!("{} '{}' is not a valid URL: {}", name, url, e))
            })?;
        }

        if self.backend.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "backend.timeout_seconds must be greater than zero".to_string(),
            ));
        }

        if self.slider.auto_slide_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "slider.auto_slide_interval_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
