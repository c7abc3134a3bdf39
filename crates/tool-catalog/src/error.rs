#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read catalog {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate tool id: {0}")]
    DuplicateId(u32),

    #[error("invalid tool {id}: {message}")]
    InvalidRecord { id: u32, message: String },
}
