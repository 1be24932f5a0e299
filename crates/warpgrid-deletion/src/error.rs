//! Deletion engine error types.

use thiserror::Error;

/// Errors raised while resolving deletion inputs.
///
/// Scoring and selection themselves cannot fail; only configuration
/// values are rejected here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeletionError {
    #[error("unsupported delete policy {0:?}, must be one of 'Random', 'Newest', or 'Oldest'")]
    UnsupportedPolicy(String),

    #[error("invalid maxUnhealthy {0:?}, expected a count or a percentage")]
    InvalidMaxUnhealthy(String),

    #[error("invalid unhealthyRange {0:?}, expected \"[min-max]\" with min <= max")]
    InvalidUnhealthyRange(String),
}

pub type DeletionResult<T> = Result<T, DeletionError>;
