//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, missing preconditions). Persistence failures belong to the
/// infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The business profile lacks mandatory legal fields.
    #[error("profile is missing mandatory fields")]
    InvalidProfile,

    /// No client exists to attach a new document to.
    #[error("no client available")]
    EmptyClients,

    /// A referenced entity does not exist.
    #[error("not found")]
    NotFound,

    /// A value failed validation (e.g. a required form field is blank).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Stable, kebab-case error kind (used as notification key by callers).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidProfile => "invalid-profile",
            Self::EmptyClients => "empty-clients",
            Self::NotFound => "not-found",
            Self::Validation(_) => "validation",
            Self::InvariantViolation(_) => "invariant-violation",
            Self::InvalidId(_) => "invalid-id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(DomainError::InvalidProfile.kind(), "invalid-profile");
        assert_eq!(DomainError::EmptyClients.kind(), "empty-clients");
        assert_eq!(DomainError::not_found().kind(), "not-found");
        assert_eq!(DomainError::validation("x").kind(), "validation");
    }

    #[test]
    fn validation_message_is_displayed() {
        let err = DomainError::validation("name is required");
        assert_eq!(err.to_string(), "validation failed: name is required");
    }
}
