//! Contract error types for student service
//!
//! These errors are transport-agnostic; the REST layer maps them to
//! HTTP Problem Details responses.

/// Student service domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentsError {
    /// Referenced entity absent or soft-deleted
    NotFound {
        /// Resource type (student, class, academic_year)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Uniqueness violation
    Conflict {
        /// Conflict reason
        reason: String,
    },
    /// Input failed a field rule; carries the first violated rule
    Validation {
        /// Validation error message
        message: String,
    },
    /// A referenced id does not resolve to a live entity
    InvalidReference {
        /// Name of the referencing field
        field: String,
        /// The offending identifier
        id: String,
    },
    /// Internal error
    Internal,
}

impl std::fmt::Display for StudentsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource, id } => {
                write!(f, "{} not found: {}", resource, id)
            }
            Self::Conflict { reason } => {
                write!(f, "Conflict: {}", reason)
            }
            Self::Validation { message } => {
                write!(f, "Validation error: {}", message)
            }
            Self::InvalidReference { field, id } => {
                write!(f, "Invalid {}: {}", field, id)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for StudentsError {}
