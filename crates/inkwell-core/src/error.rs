//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
///
/// `NotFound` and `InvalidId` are caller mistakes; everything else is a store
/// failure.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),
}
