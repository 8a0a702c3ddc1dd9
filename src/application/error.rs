//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add session-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("no question has been posed in this session")]
    NoActiveQuestion,

    #[error("the current question has already been graded")]
    AlreadyGraded,

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// Whether the caller can simply try again, e.g. with another catalog or threshold.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::Domain(
                DomainError::EmptyEligibleSet { .. } | DomainError::EmptyCatalog
            )
        )
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
