//! In-memory cache implementation using moka
//!
//! Values are stored as JSON strings. Each entry carries its own TTL through
//! a moka expiry policy; the cache-wide default applies when callers use
//! `default_ttl()`.

use super::CacheLayer;
use anyhow::{Context, Result};
use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

const DEFAULT_MAX_CAPACITY: u64 = 1_000;

const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Clone)]
struct CacheEntry {
    data: Arc<String>,
    ttl: Duration,
}

impl CacheEntry {
    fn new<T: Serialize>(value: &T, ttl: Duration) -> Result<Self> {
        let json = serde_json::to_string(value).context("Failed to serialize cache value")?;
        Ok(Self {
            data: Arc::new(json),
            ttl,
        })
    }

    fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.data).context("Failed to deserialize cache value")
    }
}

/// Expire every entry after the TTL it was stored with
struct EntryExpiry;

impl Expiry<String, CacheEntry> for EntryExpiry {
    fn expire_after_create(&self, _key: &String, value: &CacheEntry, _created_at: Instant) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory cache using moka
pub struct MemoryCache {
    cache: Cache<String, CacheEntry>,
    default_ttl: Duration,
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entry_count", &self.cache.entry_count())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_capacity_and_ttl(DEFAULT_MAX_CAPACITY, DEFAULT_TTL)
    }

    pub fn with_capacity_and_ttl(max_capacity: u64, default_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .build();

        Self { cache, default_ttl }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Flush moka's pending maintenance so counts and expiry are up to date
    pub async fn sync(&self) {
        self.cache.run_pending_tasks().await;
    }

    /// Glob match where `*` is any run of characters and `?` exactly one
    fn pattern_matches(pattern: &str, key: &str) -> bool {
        let pattern: Vec<char> = pattern.chars().collect();
        let key: Vec<char> = key.chars().collect();

        let (mut pi, mut ki) = (0, 0);
        // Position after the last `*` and the key index it was tried against
        let mut backtrack: Option<(usize, usize)> = None;

        while ki < key.len() {
            match pattern.get(pi) {
                Some('*') => {
                    backtrack = Some((pi + 1, ki));
                    pi += 1;
                }
                Some(&p) if p == '?' || p == key[ki] => {
                    pi += 1;
                    ki += 1;
                }
                _ => match backtrack {
                    Some((star_pi, star_ki)) => {
                        pi = star_pi;
                        ki = star_ki + 1;
                        backtrack = Some((star_pi, star_ki + 1));
                    }
                    None => return false,
                },
            }
        }

        pattern[pi..].iter().all(|&c| c == '*')
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheLayer for MemoryCache {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        match self.cache.get(key).await {
            Some(entry) => Ok(Some(entry.deserialize()?)),
            None => Ok(None),
        }
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) -> Result<()> {
        let entry = CacheEntry::new(value, ttl)?;
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let keys: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, _)| Self::pattern_matches(pattern, key.as_ref()))
            .map(|(key, _)| (*key).clone())
            .collect();

        for key in keys {
            self.cache.invalidate(&key).await;
        }

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Slide {
        id: String,
        image: String,
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new();

        cache.set("key1", &"value1".to_string(), Duration::from_secs(60)).await.unwrap();

        let result: Option<String> = cache.get("key1").await.unwrap();
        assert_eq!(result, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let cache = MemoryCache::new();
        let result: Option<String> = cache.get("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_records_round_trip_as_json() {
        let cache = MemoryCache::new();
        let slides = vec![Slide { id: "s1".into(), image: "slider/1.jpg".into() }];

        cache.set("slider:list", &slides, cache.default_ttl()).await.unwrap();

        let cached: Option<Vec<Slide>> = cache.get("slider:list").await.unwrap();
        assert_eq!(cached, Some(slides));
    }

    #[tokio::test]
    async fn test_wrong_type_is_an_error() {
        let cache = MemoryCache::new();
        cache.set("k", &"text".to_string(), Duration::from_secs(60)).await.unwrap();

        let result: Result<Option<Vec<Slide>>> = cache.get("k").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_per_entry_ttl() {
        let cache = MemoryCache::with_capacity_and_ttl(100, Duration::from_secs(60));

        cache.set("short", &1u32, Duration::from_millis(10)).await.unwrap();
        cache.set("long", &2u32, Duration::from_secs(60)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        cache.sync().await;

        assert_eq!(cache.get::<u32>("short").await.unwrap(), None);
        assert_eq!(cache.get::<u32>("long").await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_delete_pattern_scopes_to_resource() {
        let cache = MemoryCache::new();
        let ttl = cache.default_ttl();
        cache.set("slider:list", &1u32, ttl).await.unwrap();
        cache.set("slider:id:s1", &2u32, ttl).await.unwrap();
        cache.set("notice:list", &3u32, ttl).await.unwrap();
        cache.sync().await;

        cache.delete_pattern("slider:*").await.unwrap();

        assert_eq!(cache.get::<u32>("slider:list").await.unwrap(), None);
        assert_eq!(cache.get::<u32>("slider:id:s1").await.unwrap(), None);
        assert_eq!(cache.get::<u32>("notice:list").await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let cache = MemoryCache::new();
        let ttl = cache.default_ttl();
        cache.set("a", &1u32, ttl).await.unwrap();
        cache.set("b", &2u32, ttl).await.unwrap();

        cache.delete("a").await.unwrap();
        assert_eq!(cache.get::<u32>("a").await.unwrap(), None);

        cache.clear().await.unwrap();
        assert_eq!(cache.get::<u32>("b").await.unwrap(), None);
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn test_pattern_matches() {
        assert!(MemoryCache::pattern_matches("history:*", "history:list"));
        assert!(MemoryCache::pattern_matches("history:*", "history:"));
        assert!(MemoryCache::pattern_matches("*:list", "notice:list"));
        assert!(MemoryCache::pattern_matches("a*b*c", "axxbyyc"));
        assert!(MemoryCache::pattern_matches("slider:id:s?", "slider:id:s1"));
        assert!(!MemoryCache::pattern_matches("slider:id:s?", "slider:id:s10"));
        assert!(!MemoryCache::pattern_matches("history:*", "mission-vision:list"));
        assert!(!MemoryCache::pattern_matches("a*b", "ac"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(50))]

            #[test]
            fn prefix_star_matches_every_suffix(prefix in "[a-z-]{1,12}", suffix in "[a-z0-9:]{0,16}") {
                let pattern = format!("{}:*", prefix);
                let key = format!("{}:{}", prefix, suffix);
                prop_assert!(MemoryCache::pattern_matches(&pattern, &key));
            }

            #[test]
            fn literal_pattern_matches_only_itself(a in "[a-z:]{1,12}", b in "[a-z:]{1,12}") {
                prop_assert_eq!(MemoryCache::pattern_matches(&a, &b), a == b);
            }
        }
    }
}
