use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown species field: {0}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, CleanerError>;
