mod cache;
mod config;
mod engine;
mod error;
mod model;
mod parser;
mod render;
mod search;
mod server;
mod theme;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cache::CatalogCache;
use config::Config;
use parser::Catalog;
use server::{LoadInfo, ToolCatalogServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting tool-catalog MCP server");

    let config = Config::from_env()?;
    info!(
        catalog = %config.catalog.describe(),
        redis = config.redis_url.is_some(),
        "configuration loaded"
    );

    let redis_cache = catalog_common::redis::RedisCache::new(config.redis_url.as_deref());
    if redis_cache.is_available().await {
        info!("redis connected");
    } else {
        info!("redis unavailable, preferences kept in memory");
    }
    let cache = Arc::new(CatalogCache::new(redis_cache));

    let catalog = Catalog::load_or_empty(&config.catalog);
    let changed_since_last_run = if catalog.fingerprint.is_empty() {
        false
    } else {
        cache.record_catalog_fingerprint(&catalog.fingerprint).await
    };

    let server = ToolCatalogServer::new(
        catalog,
        cache,
        LoadInfo {
            source: config.catalog.describe(),
            changed_since_last_run,
        },
    );

    if let Some(addr) = config.listen_addr {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                tracing::info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                tracing::info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
