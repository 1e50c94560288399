//! Domain-level error types.

use thiserror::Error;

/// Domain errors - failures detected before or after touching the store.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Repository-level errors.
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

    /// The payload cannot be represented in the store's document format.
    #[error("Encoding failed: {0}")]
    Encoding(String),
}
