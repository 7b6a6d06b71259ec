//! Error handling
//!
//! Structural problems (schema, degenerate labels) are fatal and surface as
//! `PrepError`. Cell-level anomalies never reach this type; they are zero-filled
//! and reported through `features::CoercionWarning`.

use thiserror::Error;

pub type PrepResult<T> = Result<T, PrepError>;

#[derive(Debug, Error)]
pub enum PrepError {
    /// No row matched the normal value, so the target would be single-class.
    /// Callers may retry with the next candidate.
    #[error("degenerate label: normal value '{normal_value}' matched none of {rows} rows")]
    DegenerateLabel { normal_value: String, rows: usize },

    /// Every candidate in a fallback chain was degenerate
    #[error("no normal-value candidate produced a two-class target (tried: {})", .tried.join(", "))]
    NoNormalCandidate { tried: Vec<String> },

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PrepError {
    pub fn schema(msg: impl Into<String>) -> Self {
        PrepError::SchemaMismatch(msg.into())
    }

    /// Whether the caller can recover by choosing another normal value
    pub fn is_retryable(&self) -> bool {
        matches!(self, PrepError::DegenerateLabel { .. })
    }
}
