//! Error types shared across the CLI.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for depwatch operations.
#[derive(Error, Debug)]
pub enum DepwatchError {
    /// The config directory or file is missing from disk.
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingEnvVar(&'static str),

    /// No credential record is marked as the default user.
    #[error("no default user set")]
    NoDefaultUser,

    /// An operation referenced an email with no stored credentials.
    #[error("no credentials stored for {0}")]
    UnknownUser(String),

    /// Local configuration problems other than a missing file.
    #[error("configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// The server answered with a non-2xx status and an error body.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a server response.
    #[error("request failed: {0}")]
    Http(String),
}

impl From<std::io::Error> for DepwatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DepwatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for DepwatchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Result type alias for depwatch operations.
pub type DepwatchResult<T> = Result<T, DepwatchError>;
