use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TimesheetError>;

#[derive(Error, Debug)]
pub enum TimesheetError {
    #[error("API token is missing or empty")]
    MissingCredential,
    #[error("Invalid date input '{input}': {reason}")]
    InvalidDateInput { input: String, reason: String },
    #[error("Invalid endpoint template at line {line}: {reason}")]
    InvalidEndpoint { line: usize, reason: String },
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("Failed to write report to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
