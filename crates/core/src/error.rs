//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every rejection a registry can produce. Caller mistakes (unknown ids) and
/// business refusals (insufficient funds) are reported the same way; none of
/// them is fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No entity of this kind was ever issued the given id.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The entity is in a terminal or restricted state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A business rule refused the operation (funds, capacity, stock, limits).
    #[error("{0}")]
    RuleViolation(String),

    /// A value failed validation (e.g. non-positive amount, blank name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl core::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn rule(msg: impl Into<String>) -> Self {
        Self::RuleViolation(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Short machine-friendly label, used as a structured logging field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidState(_) => "invalid_state",
            Self::RuleViolation(_) => "rule_violation",
            Self::Validation(_) => "validation",
            Self::InvalidId(_) => "invalid_id",
        }
    }
}
