//! Domain error model.

use thiserror::Error;

use crate::config::Violations;

/// Result type used across the domain and service layers.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Services propagate these unchanged; transport adapters map them onto
/// protocol-specific status codes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more configuration fields failed validation.
    #[error("validation failed: {0}")]
    Validation(Violations),

    /// An identifier was invalid (e.g. blank).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No record exists for the requested identifier.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The backing store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The caller deactivated the request context.
    #[error("operation cancelled")]
    Cancelled,
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Violations carried by a validation failure, if any.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Validation(v) => Some(v),
            _ => None,
        }
    }
}

/// Store failure, opaque to the service layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Internal lock poisoned by a panicking writer.
    #[error("repository lock poisoned")]
    Poisoned,

    #[error("repository i/o failure: {0}")]
    Io(String),

    #[error("repository serialization failure: {0}")]
    Serialization(String),
}
