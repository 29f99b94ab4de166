//! Cache layer
//!
//! Reads from the remote backend are cached in-process so that page renders
//! don't hit the backend on every request. Entries are stored as JSON so any
//! serializable record type can be cached under a string key.
//!
//! Keys follow the `<resource>:list` / `<resource>:id:<id>` convention and
//! are invalidated by glob pattern after mutations.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheConfig;

pub use memory::MemoryCache;

/// Cache layer trait
///
/// Generic methods keep this trait from being object safe; callers hold a
/// concrete `Arc<MemoryCache>`.
#[async_trait]
pub trait CacheLayer: Send + Sync {
    /// Get a value from cache
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;

    /// Set a value in cache with TTL
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) -> Result<()>;

    /// Delete a value from cache
    async fn delete(&self, key: &str) -> Result<()>;

    /// Delete all values matching a glob pattern
    async fn delete_pattern(&self, pattern: &str) -> Result<()>;

    /// Clear all cache entries
    async fn clear(&self) -> Result<()>;
}

/// Create the shared cache from configuration
pub fn create_cache(config: &CacheConfig) -> Arc<MemoryCache> {
    let ttl = Duration::from_secs(config.ttl_seconds);
    tracing::debug!(
        "Creating memory cache (capacity {}, ttl {:?})",
        config.max_capacity,
        ttl
    );
    Arc::new(MemoryCache::with_capacity_and_ttl(config.max_capacity, ttl))
}
