use thiserror::Error;

#[derive(Error, Debug)]
pub enum VersetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error("Subtitle error: {0}")]
    Subtitle(String),

    #[error("Alignment error: {0}")]
    Alignment(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, VersetError>;
