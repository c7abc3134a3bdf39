/// Redis key/value wrapper with graceful degradation.
///
/// Every operation swallows Redis failures: it logs a warning and reports
/// absence (`None` / `false`). Catalog servers treat Redis as an optional
/// preference store and stay fully functional without it.
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::warn;

use crate::error::CommonError;

pub struct RedisCache {
    client: Option<redis::Client>,
}

impl RedisCache {
    /// Create a cache for `url`. A `None` URL or an unparsable one yields a cache
    /// whose operations are all no-ops.
    pub fn new(url: Option<&str>) -> Self {
        let client = url.and_then(|u| {
            redis::Client::open(u)
                .inspect_err(|e| warn!(error = %e, url = u, "failed to create redis client, store disabled"))
                .ok()
        });
        Self { client }
    }

    /// A cache that never talks to Redis.
    pub fn disabled() -> Self {
        Self { client: None }
    }

    /// Test the connection by sending a PING.
    pub async fn is_available(&self) -> bool {
        let Some(client) = &self.client else {
            return false;
        };
        let Ok(mut conn) = client.get_multiplexed_async_connection().await else {
            return false;
        };
        let result: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;
        result.is_ok()
    }

    /// Get a value. `None` if Redis is unavailable or the key doesn't exist.
    pub async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis GET failed"))
            .ok()?;
        value
    }

    /// Set a value with no expiry. Returns `true` if the write reached Redis.
    pub async fn set(&self, key: &str, value: &str) -> bool {
        let Some(mut conn) = self.connection().await else {
            return false;
        };
        conn.set::<_, _, ()>(key, value)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis SET failed"))
            .is_ok()
    }

    /// `None` when no client is configured or the connection fails; only the
    /// latter is logged.
    async fn connection(&self) -> Option<MultiplexedConnection> {
        let client = self.client.as_ref()?;
        client
            .get_multiplexed_async_connection()
            .await
            .map_err(CommonError::from)
            .inspect_err(|e| warn!(error = %e, "redis connection failed"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::RedisCache;

    #[tokio::test]
    async fn disabled_cache_degrades_to_no_ops() {
        let cache = RedisCache::new(None);
        assert!(!cache.is_available().await);
        assert_eq!(cache.get("tcat:v1:anything").await, None);
        assert!(!cache.set("tcat:v1:anything", "value").await);
    }

    #[tokio::test]
    async fn invalid_url_disables_cache() {
        let cache = RedisCache::new(Some("not a redis url"));
        assert!(!cache.is_available().await);
        assert!(!cache.set("tcat:v1:anything", "value").await);
    }
}
