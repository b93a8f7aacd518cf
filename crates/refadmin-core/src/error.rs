//! Domain-level error types.

use thiserror::Error;

/// Failures of a backend call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The backend refused the credentials.
    #[error("{0}")]
    Rejected(String),

    #[error("No session token available")]
    Unauthenticated,
}

/// Quiz submission rejected before anything is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("Invalid date format. Please enter a valid date.")]
    InvalidLiveAt(String),

    /// `question` is 1-based.
    #[error("Please select a correct option for Question {question}.")]
    MissingCorrectOption { question: usize },
}

/// Cookie store failures.
#[derive(Debug, Error)]
pub enum CookieStoreError {
    #[error("Cookie storage I/O failed: {0}")]
    Io(String),

    #[error("Cookie serialization failed: {0}")]
    Serialization(String),
}
