//! Cached access to one remote resource
//!
//! Reads go through the cache under `<name>:list` and `<name>:id:<id>`.
//! Every successful mutation drops all keys of the resource so the next read
//! refetches.

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use super::{ServiceError, ServiceResult};
use crate::backend::{FormPayload, ResourceStore};
use crate::cache::{CacheLayer, MemoryCache};

pub struct ResourceService<T> {
    name: String,
    store: Arc<dyn ResourceStore<T>>,
    cache: Arc<MemoryCache>,
}

impl<T> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            store: self.store.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<T> ResourceService<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// The cache namespace is the store path without slashes
    pub fn new(store: Arc<dyn ResourceStore<T>>, cache: Arc<MemoryCache>) -> Self {
        let name = store.path().trim_matches('/').replace('/', ":");
        Self { name, store, cache }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn list_key(&self) -> String {
        format!("{}:list", self.name)
    }

    fn item_key(&self, id: &str) -> String {
        format!("{}:id:{}", self.name, id)
    }

    pub async fn list(&self) -> ServiceResult<Vec<T>> {
        let key = self.list_key();
        if let Some(items) = self.cached(&key).await {
            return Ok(items);
        }

        let items = self.store.list().await?;
        self.store_in_cache(&key, &items).await;
        Ok(items)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Option<T>> {
        let key = self.item_key(id);
        if let Some(item) = self.cached(&key).await {
            return Ok(Some(item));
        }

        let item = self.store.get_by_id(id).await?;
        if let Some(ref item) = item {
            self.store_in_cache(&key, item).await;
        }
        Ok(item)
    }

    /// Like `get`, but a missing record is an error
    pub async fn require(&self, id: &str) -> ServiceResult<T> {
        self.get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("{} {}", self.name, id)))
    }

    pub async fn create(&self, body: serde_json::Value) -> ServiceResult<Option<T>> {
        let created = self.store.create(body).await?;
        self.invalidate().await;
        Ok(created)
    }

    pub async fn create_form(&self, form: FormPayload) -> ServiceResult<Option<T>> {
        let created = self.store.create_form(form).await?;
        self.invalidate().await;
        Ok(created)
    }

    pub async fn update(&self, id: &str, body: serde_json::Value) -> ServiceResult<Option<T>> {
        let updated = self.store.update(id, body).await?;
        self.invalidate().await;
        Ok(updated)
    }

    pub async fn update_form(&self, id: &str, form: FormPayload) -> ServiceResult<Option<T>> {
        let updated = self.store.update_form(id, form).await?;
        self.invalidate().await;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        self.store.delete(id).await?;
        self.invalidate().await;
        Ok(())
    }

    /// Drop every cached read of this resource
    pub async fn invalidate(&self) {
        let pattern = format!("{}:*", self.name);
        if let Err(e) = self.cache.delete_pattern(&pattern).await {
            tracing::warn!("Failed to invalidate cache for {}: {}", self.name, e);
        }
    }

    async fn cached<V: DeserializeOwned + Send>(&self, key: &str) -> Option<V> {
        match self.cache.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Ignoring unreadable cache entry {}: {}", key, e);
                None
            }
        }
    }

    async fn store_in_cache<V: Serialize + Send + Sync>(&self, key: &str, value: &V) {
        if let Err(e) = self.cache.set(key, value, self.cache.default_ttl()).await {
            tracing::warn!("Failed to cache {}: {}", key, e);
        }
    }
}
