//! Generic list/get/create/update/delete over one REST resource

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{BackendClient, FormPayload, Result};

/// CRUD access to one remote resource
///
/// Bodies are passed as `serde_json::Value` so the trait stays object safe.
#[async_trait]
pub trait ResourceStore<T>: Send + Sync {
    /// Resource path, e.g. `/history`
    fn path(&self) -> &str;

    async fn list(&self) -> Result<Vec<T>>;

    /// `Ok(None)` when the backend answers 404
    async fn get_by_id(&self, id: &str) -> Result<Option<T>>;

    async fn create(&self, body: serde_json::Value) -> Result<Option<T>>;

    async fn create_form(&self, form: FormPayload) -> Result<Option<T>>;

    async fn update(&self, id: &str, body: serde_json::Value) -> Result<Option<T>>;

    async fn update_form(&self, id: &str, form: FormPayload) -> Result<Option<T>>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// `ResourceStore` backed by the remote REST API
pub struct HttpResource<T> {
    client: BackendClient,
    path: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HttpResource<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(client: BackendClient, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = format!("/{}", path.trim_matches('/'));
        Self {
            client,
            path,
            _marker: PhantomData,
        }
    }

    pub fn boxed(client: BackendClient, path: impl Into<String>) -> Arc<dyn ResourceStore<T>> {
        Arc::new(Self::new(client, path))
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, urlencoding::encode(id))
    }
}

#[async_trait]
impl<T> ResourceStore<T> for HttpResource<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    fn path(&self) -> &str {
        &self.path
    }

    async fn list(&self) -> Result<Vec<T>> {
        self.client.get(&self.path, &[]).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        match self.client.get(&self.item_path(id), &[]).await {
            Ok(item) => Ok(Some(item)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, body: serde_json::Value) -> Result<Option<T>> {
        self.client.send_json(Method::POST, &self.path, &body).await
    }

    async fn create_form(&self, form: FormPayload) -> Result<Option<T>> {
        self.client.send_form(Method::POST, &self.path, form).await
    }

    async fn update(&self, id: &str, body: serde_json::Value) -> Result<Option<T>> {
        self.client
            .send_json(Method::PUT, &self.item_path(id), &body)
            .await
    }

    async fn update_form(&self, id: &str, form: FormPayload) -> Result<Option<T>> {
        self.client
            .send_form(Method::PUT, &self.item_path(id), form)
            .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&self.item_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FilePart;
    use httpmock::prelude::*;
    use serde::Deserialize;
    use std::time::Duration;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Slide {
        #[serde(alias = "_id")]
        id: String,
        image: String,
        status: String,
    }

    fn resource(server: &MockServer, path: &str) -> HttpResource<Slide> {
        let client = BackendClient::with_base_url(&server.base_url(), Duration::from_secs(5), None).unwrap();
        HttpResource::new(client, path)
    }

    #[test]
    fn test_path_normalised() {
        let client = BackendClient::with_base_url("http://api.test", Duration::from_secs(1), None).unwrap();
        let store: HttpResource<Slide> = HttpResource::new(client, "slider/");
        assert_eq!(store.path(), "/slider");
        assert_eq!(store.item_path("a b"), "/slider/a%20b");
    }

    #[tokio::test]
    async fn test_list_accepts_mongo_ids() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slider");
                then.status(200).json_body(serde_json::json!([
                    { "_id": "s1", "image": "slider/a.jpg", "status": "active" }
                ]));
            })
            .await;

        let slides = resource(&server, "/slider").list().await.unwrap();
        assert_eq!(slides[0].id, "s1");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slider/missing");
                then.status(404).json_body(serde_json::json!({ "message": "Not found" }));
            })
            .await;

        let slide = resource(&server, "/slider").get_by_id("missing").await.unwrap();
        assert!(slide.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_server_error_propagates() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slider/s1");
                then.status(500);
            })
            .await;

        let err = resource(&server, "/slider").get_by_id("s1").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_update_form_uses_put_multipart() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/slider/s1")
                    .body_contains("name=\"status\"")
                    .body_contains("inactive");
                then.status(200).json_body(serde_json::json!({
                    "data": { "_id": "s1", "image": "slider/a.jpg", "status": "inactive" }
                }));
            })
            .await;

        let form = FormPayload::new()
            .text("status", "inactive")
            .file("image", FilePart::new("a.jpg", "image/jpeg", vec![0xff, 0xd8]));
        let updated = resource(&server, "/slider").update_form("s1", form).await.unwrap();

        mock.assert_async().await;
        assert_eq!(updated.unwrap().status, "inactive");
    }

    #[tokio::test]
    async fn test_create_and_delete() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/slider")
                    .json_body(serde_json::json!({ "status": "active" }));
                then.status(201);
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/slider/s9");
                then.status(200).json_body(serde_json::json!({ "message": "deleted" }));
            })
            .await;

        let store = resource(&server, "/slider");
        let created = store.create(serde_json::json!({ "status": "active" })).await.unwrap();
        store.delete("s9").await.unwrap();

        create.assert_async().await;
        delete.assert_async().await;
        assert!(created.is_none());
    }
}
