/// Persistence layer for the tool catalog server.
///
/// Preferences fall back to an in-process map when Redis is unavailable, so a
/// session keeps its choices even without persistence.
///
/// Key schema:
/// - `tcat:v1:pref:{key}`: preference string (no TTL)
/// - `tcat:v1:catalog_fingerprint`: SHA-256 of the last catalog loaded
use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::info;

use catalog_common::redis::RedisCache;

const KEY_PREFIX: &str = "tcat:v1:";

pub struct CatalogCache {
    redis: RedisCache,
    local: Mutex<HashMap<String, String>>,
}

impl CatalogCache {
    pub fn new(redis: RedisCache) -> Self {
        Self {
            redis,
            local: Mutex::new(HashMap::new()),
        }
    }

    /// The in-process value wins once set; Redis only seeds it on first read.
    pub async fn get_preference(&self, key: &str) -> Option<String> {
        if let Some(value) = self.local.lock().await.get(key).cloned() {
            return Some(value);
        }
        let redis_key = format!("{KEY_PREFIX}pref:{key}");
        let value = self.redis.get(&redis_key).await?;
        let mut local = self.local.lock().await;
        Some(local.entry(key.to_string()).or_insert(value).clone())
    }

    pub async fn set_preference(&self, key: &str, value: &str) {
        self.local
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        let redis_key = format!("{KEY_PREFIX}pref:{key}");
        self.redis.set(&redis_key, value).await;
    }

    pub async fn get_catalog_fingerprint(&self) -> Option<String> {
        self.redis
            .get(&format!("{KEY_PREFIX}catalog_fingerprint"))
            .await
    }

    pub async fn set_catalog_fingerprint(&self, fingerprint: &str) {
        self.redis
            .set(&format!("{KEY_PREFIX}catalog_fingerprint"), fingerprint)
            .await;
    }

    /// Store `current` and report whether it differs from the previous run's.
    /// The first run (nothing stored) is not a change.
    pub async fn record_catalog_fingerprint(&self, current: &str) -> bool {
        let previous = self.get_catalog_fingerprint().await;
        if previous.as_deref() == Some(current) {
            return false;
        }
        self.set_catalog_fingerprint(current).await;
        let changed = previous.is_some();
        if changed {
            info!(fingerprint = current, "catalog content changed since last run");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn preferences_survive_without_redis() {
        let cache = CatalogCache::new(RedisCache::disabled());
        assert_eq!(cache.get_preference("ai-tools-theme").await, None);

        cache.set_preference("ai-tools-theme", "dark").await;
        assert_eq!(cache.get_preference("ai-tools-theme").await.as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn writes_that_miss_redis_still_take_effect() {
        let cache = CatalogCache::new(RedisCache::new(Some("redis://127.0.0.1:1/")));
        cache.set_preference("ai-tools-theme", "dark").await;
        assert_eq!(cache.get_preference("ai-tools-theme").await.as_deref(), Some("dark"));
        cache.set_preference("ai-tools-theme", "light").await;
        assert_eq!(cache.get_preference("ai-tools-theme").await.as_deref(), Some("light"));
    }

    #[tokio::test]
    async fn fingerprint_is_never_a_change_without_redis() {
        let cache = CatalogCache::new(RedisCache::disabled());
        assert!(!cache.record_catalog_fingerprint("abc").await);
        assert!(!cache.record_catalog_fingerprint("def").await);
    }
}
