use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("state lock poisoned: {0}")]
    Poisoned(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
