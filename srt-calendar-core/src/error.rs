//! Error types for srt-calendar.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching reservations or building a calendar.
#[derive(Error, Debug)]
pub enum SrtCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("SRT login failed: {0}")]
    Authentication(String),

    #[error("SRT request failed: {0}")]
    RemoteService(String),

    #[error("Could not load fixture {}: {reason}", path.display())]
    MalformedFixture { path: PathBuf, reason: String },

    #[error("Malformed reservation: {0}")]
    MalformedReservation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SrtCalError {
    fn from(err: reqwest::Error) -> Self {
        SrtCalError::RemoteService(err.to_string())
    }
}

/// Result type alias for srt-calendar operations.
pub type SrtCalResult<T> = Result<T, SrtCalError>;
