//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent catalog and quiz rule violations.
///
/// Missing edges and missing nodes during graph building or walking are data gaps:
/// they are skipped and logged, never returned as errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown item: {0}")]
    UnknownItem(String),

    #[error("no eligible items: no item has a crafting tree of at least {min_tree_size} entries")]
    EmptyEligibleSet { min_tree_size: usize },

    #[error("no items left in scope after filtering")]
    EmptyCatalog,

    #[error("malformed record {id}: missing {field}")]
    MalformedRecord { id: String, field: &'static str },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
