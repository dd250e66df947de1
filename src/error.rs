use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unknown weather region: {0}")]
    UnknownRegion(String),

    #[error("Missing required data: {0}")]
    MissingData(String),
}

impl From<::config::ConfigError> for ProcessingError {
    fn from(err: ::config::ConfigError) -> Self {
        ProcessingError::Config(err.to_string())
    }
}
