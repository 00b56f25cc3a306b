//! Error types for curlkit

use thiserror::Error;

/// Main error type for curlkit
///
/// Parsing, serialization and dispatch never surface these for their normal
/// failure paths; they are reserved for file loading and CLI plumbing.
#[derive(Error, Debug)]
pub enum CurlkitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

pub type Result<T> = std::result::Result<T, CurlkitError>;
