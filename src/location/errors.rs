//! Error types for location lookups and selection

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Location API error: {0}")]
    Api(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Not selectable: {0}")]
    NotSelectable(String),

    #[error("A saved location is still being restored")]
    RestoreInProgress,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type LocationResult<T> = Result<T, LocationError>;
