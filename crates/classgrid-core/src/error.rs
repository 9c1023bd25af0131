//! Error types for classgrid

use thiserror::Error;

/// Main error type for classgrid operations
#[derive(Debug, Error)]
pub enum ClassgridError {
    /// The request or its constraints are inconsistent. Raised before any
    /// combination is generated.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// These subjects have no valid group left after filtering.
    #[error("Unsatisfiable subjects: {}", .0.join(", "))]
    UnsatisfiableSubjects(Vec<String>),

    /// A session record violates its invariants.
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// The raw class payload could not be decoded.
    #[error("Malformed class payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Search was cancelled before completion
    #[error("Search was cancelled")]
    Cancelled,
}

impl ClassgridError {
    /// Shorthand for a [`ClassgridError::Configuration`] error.
    pub fn configuration(message: impl Into<String>) -> Self {
        ClassgridError::Configuration(message.into())
    }

    /// Returns the offending subject codes of an unsatisfiable request.
    pub fn unsatisfiable_subjects(&self) -> &[String] {
        match self {
            ClassgridError::UnsatisfiableSubjects(subjects) => subjects,
            _ => &[],
        }
    }
}

/// Result type alias for classgrid operations
pub type Result<T> = std::result::Result<T, ClassgridError>;
