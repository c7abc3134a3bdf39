/// Error types shared across catalog server crates.
///
/// These represent failures in infrastructure components (Redis) that any
/// catalog server may depend on. Application-specific errors belong in each
/// server crate.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}
