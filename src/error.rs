//! Error types for roster construction and scheduling runs.
//!
//! Only top-level data-format problems are errors. Per-slot and per-staff
//! anomalies (no eligible staff, malformed identifiers) are absorbed by the
//! engine and show up as unfilled slots or warnings instead.

use crate::validation::ValidationError;

/// Result type for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Error type for scheduling operations.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// A date string is not `YYYY-MM-DD` or does not name a real day.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Input failed structural validation.
    #[error("Invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// No input document was supplied at all.
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScheduleError {
    pub(crate) fn invalid_date(value: impl Into<String>) -> Self {
        ScheduleError::InvalidDate {
            value: value.into(),
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
