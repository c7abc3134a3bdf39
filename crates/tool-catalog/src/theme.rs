use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::cache::CatalogCache;

/// Preference key shared with the standalone tool pages.
pub const THEME_KEY: &str = "ai-tools-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Unknown or missing values read as `Light`.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ThemeStore {
    cache: Arc<CatalogCache>,
}

impl ThemeStore {
    pub fn new(cache: Arc<CatalogCache>) -> Self {
        Self { cache }
    }

    pub async fn current(&self) -> Theme {
        Theme::from_stored(self.cache.get_preference(THEME_KEY).await.as_deref())
    }

    /// Flip the theme and persist the result.
    pub async fn toggle(&self) -> Theme {
        let next = self.current().await.toggled();
        self.cache.set_preference(THEME_KEY, next.as_str()).await;
        debug!(theme = %next, "theme toggled");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_common::redis::RedisCache;

    #[test]
    fn stored_values() {
        assert_eq!(Theme::from_stored(None), Theme::Light);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("solarized")), Theme::Light);
    }

    #[tokio::test]
    async fn toggle_writes_every_time() {
        let cache = Arc::new(CatalogCache::new(RedisCache::disabled()));
        let store = ThemeStore::new(Arc::clone(&cache));
        assert_eq!(store.current().await, Theme::Light);

        assert_eq!(store.toggle().await, Theme::Dark);
        assert_eq!(cache.get_preference(THEME_KEY).await.as_deref(), Some("dark"));

        assert_eq!(store.toggle().await, Theme::Light);
        assert_eq!(store.current().await, Theme::Light);
    }

    #[tokio::test]
    async fn toggle_flips_when_redis_rejects_writes() {
        let cache = Arc::new(CatalogCache::new(RedisCache::new(Some("redis://127.0.0.1:1/"))));
        let store = ThemeStore::new(cache);
        assert_eq!(store.toggle().await, Theme::Dark);
        assert_eq!(store.toggle().await, Theme::Light);
        assert_eq!(store.toggle().await, Theme::Dark);
        assert_eq!(store.current().await, Theme::Dark);
    }
}
