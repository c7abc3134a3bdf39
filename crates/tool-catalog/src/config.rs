use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

/// Where the catalog data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// `data/catalog.json`, embedded at compile time.
    Bundled,
    File(PathBuf),
}

impl CatalogSource {
    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Bundled => "bundled".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL. `None` keeps preferences in memory only.
    pub redis_url: Option<String>,
    pub catalog: CatalogSource,
    /// Serve MCP over TCP on this address instead of stdio.
    pub listen_addr: Option<SocketAddr>,
}

impl Config {
    /// Optional:
    /// - `TOOL_CATALOG_PATH` (catalog JSON file; default: the bundled catalog)
    /// - `REDIS_URL`
    /// - `MCP_TCP_LISTEN_ADDR` (e.g. "127.0.0.1:7000"; default: stdio)
    ///
    /// The path is not checked here. An unreadable file surfaces at load time
    /// and degrades to the empty catalog.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(
            std::env::var("TOOL_CATALOG_PATH").ok(),
            std::env::var("REDIS_URL").ok(),
            std::env::var("MCP_TCP_LISTEN_ADDR").ok(),
        )
    }

    fn from_vars(
        catalog_path: Option<String>,
        redis_url: Option<String>,
        listen_addr: Option<String>,
    ) -> Result<Self, AppError> {
        let catalog = match catalog_path.filter(|p| !p.trim().is_empty()) {
            None => CatalogSource::Bundled,
            Some(path) => CatalogSource::File(PathBuf::from(path.trim())),
        };

        let listen_addr = match listen_addr.filter(|a| !a.trim().is_empty()) {
            None => None,
            Some(addr) => Some(addr.trim().parse::<SocketAddr>().map_err(|e| {
                AppError::Config(format!("MCP_TCP_LISTEN_ADDR is not a socket address ({addr}): {e}"))
            })?),
        };

        Ok(Self {
            redis_url: redis_url.filter(|u| !u.trim().is_empty()),
            catalog,
            listen_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_bundled_catalog() {
        let config = Config::from_vars(None, None, None).expect("config");
        assert_eq!(config.catalog, CatalogSource::Bundled);
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = Config::from_vars(Some("  ".into()), Some(String::new()), Some(" ".into()))
            .expect("config");
        assert_eq!(config.catalog, CatalogSource::Bundled);
        assert!(config.redis_url.is_none());
        assert!(config.listen_addr.is_none());
    }

    #[test]
    fn listen_addr_is_parsed() {
        let config = Config::from_vars(None, None, Some("127.0.0.1:7000".into())).expect("config");
        assert_eq!(config.listen_addr, Some("127.0.0.1:7000".parse::<SocketAddr>().expect("addr")));

        let err = Config::from_vars(None, None, Some("localhost".into())).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn missing_catalog_file_degrades_to_empty_catalog() {
        let config = Config::from_vars(Some(" /nonexistent/catalog.json ".into()), None, None)
            .expect("a missing file is not a config error");
        assert_eq!(
            config.catalog,
            CatalogSource::File(PathBuf::from("/nonexistent/catalog.json"))
        );

        let catalog = crate::parser::Catalog::load_or_empty(&config.catalog);
        assert!(catalog.tools.is_empty());
        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].count, 0);
    }
}
