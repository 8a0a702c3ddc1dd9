//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::from(ApplicationError::Domain(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Parse { .. } => crate::exitcode::DATAERR,
                InfraError::NoCatalog => crate::exitcode::NOINPUT,
                InfraError::Application(app) => match app {
                    a if a.is_retryable() => crate::exitcode::TEMPFAIL,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::Domain(DomainError::MalformedRecord { .. }) => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::Domain(DomainError::UnknownItem(_)) => {
                        crate::exitcode::USAGE
                    }
                    _ => crate::exitcode::SOFTWARE,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_eligible_set_when_exit_code_then_tempfail() {
        let err = CliError::from(DomainError::EmptyEligibleSet { min_tree_size: 5 });
        assert_eq!(err.exit_code(), crate::exitcode::TEMPFAIL);
    }

    #[test]
    fn given_malformed_record_when_exit_code_then_dataerr() {
        let err = CliError::from(DomainError::MalformedRecord {
            id: "1".into(),
            field: "gold.total",
        });
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }
}
