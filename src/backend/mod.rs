//! Remote REST backend
//!
//! Every piece of content shown or edited by the site lives in an external
//! backend service. This module contains:
//! - `BackendClient`: a thin reqwest wrapper bound to one base URL
//! - `ResourceStore` / `HttpResource`: the generic list/get/create/update/delete
//!   abstraction shared by every content type
//! - `ResultApiClient`: the separate third-party exam result service

pub mod error;
pub mod form;
#[cfg(test)]
pub mod memory;
pub mod resource;
pub mod result_api;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::models::{
    Achievement, Feature, HeaderData, HistoryData, MissionVisionItem, Notice, SliderData,
};

pub use error::{BackendError, Result};
pub use form::{FilePart, FormPayload};
pub use resource::{HttpResource, ResourceStore};
pub use result_api::{ResultApiClient, ResultSource};

/// Response body, either bare or wrapped as `{ "data": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(data) => data,
        }
    }
}

/// Every remote resource the site reads or edits
#[derive(Clone)]
pub struct BackendStores {
    pub info: Arc<dyn ResourceStore<HeaderData>>,
    pub history: Arc<dyn ResourceStore<HistoryData>>,
    pub mission_vision: Arc<dyn ResourceStore<MissionVisionItem>>,
    pub slider: Arc<dyn ResourceStore<SliderData>>,
    pub features: Arc<dyn ResourceStore<Feature>>,
    pub notices: Arc<dyn ResourceStore<Notice>>,
    pub achievements: Arc<dyn ResourceStore<Achievement>>,
    pub results: Arc<dyn ResultSource>,
}

impl BackendStores {
    /// Stores backed by the content backend and the result service
    pub fn http(client: &BackendClient, results: ResultApiClient) -> Self {
        Self {
            info: HttpResource::boxed(client.clone(), "/info"),
            history: HttpResource::boxed(client.clone(), "/history"),
            mission_vision: HttpResource::boxed(client.clone(), "/mission-vision"),
            slider: HttpResource::boxed(client.clone(), "/slider"),
            features: HttpResource::boxed(client.clone(), "/features"),
            notices: HttpResource::boxed(client.clone(), "/notice"),
            achievements: HttpResource::boxed(client.clone(), "/achievements"),
            results: Arc::new(results),
        }
    }
}

/// HTTP client bound to one API base URL
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    /// Create a client for the content backend
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Self::with_base_url(
            &config.api_url,
            Duration::from_secs(config.timeout_seconds),
            config.token.clone(),
        )
    }

    /// Create a client for an arbitrary base URL
    pub fn with_base_url(base_url: &str, timeout: Duration, token: Option<String>) -> Result<Self> {
        reqwest::Url::parse(base_url)
            .map_err(|e| BackendError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport {
                path: base_url.to_string(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a resource path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET a JSON document
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .send(path, self.request(Method::GET, path).query(query))
            .await?;
        decode(path, response).await
    }

    /// Send a JSON body; the acknowledgement is decoded best-effort
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<Option<T>> {
        let response = self.send(path, self.request(method, path).json(body)).await?;
        decode_ack(path, response).await
    }

    /// Send a multipart form; the acknowledgement is decoded best-effort
    pub async fn send_form<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: FormPayload,
    ) -> Result<Option<T>> {
        let form = form.into_multipart()?;
        let response = self
            .send(path, self.request(method, path).multipart(form))
            .await?;
        decode_ack(path, response).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(path, self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    async fn send(&self, path: &str, builder: RequestBuilder) -> Result<Response> {
        tracing::debug!("Backend request: {}", self.url(path));

        let response = builder.send().await.map_err(|e| BackendError::Transport {
            path: path.to_string(),
            source: e,
        })?;

        let status = response.status();
        tracing::debug!("Backend response status for {}: {}", path, status);
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Status {
            path: path.to_string(),
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
    let bytes = response.bytes().await.map_err(|e| BackendError::Transport {
        path: path.to_string(),
        source: e,
    })?;

    serde_json::from_slice::<Envelope<T>>(&bytes)
        .map(Envelope::into_inner)
        .map_err(|e| BackendError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
}

async fn decode_ack<T: DeserializeOwned>(path: &str, response: Response) -> Result<Option<T>> {
    let bytes = response.bytes().await.map_err(|e| BackendError::Transport {
        path: path.to_string(),
        source: e,
    })?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    match serde_json::from_slice::<Envelope<T>>(&bytes) {
        Ok(envelope) => Ok(Some(envelope.into_inner())),
        Err(e) => {
            tracing::debug!("Unrecognised acknowledgement from {}: {}", path, e);
            Ok(None)
        }
    }
}

/// Pull a human readable message out of an error body
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }
    trimmed.chars().take(200).collect()
}
