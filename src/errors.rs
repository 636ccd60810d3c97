// Copyright 2025 Cowboy AI, LLC.

//! Error types for case operations

use thiserror::Error;

/// Errors that can occur in case operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A structurally required value is missing or malformed
    ///
    /// This is a programming error on the caller's side. It is always raised
    /// before any state has been touched.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A reference code does not resolve to a known enumeration member
    #[error("Unknown {kind} code: {code}")]
    UnknownCode {
        /// Which code table was consulted
        kind: &'static str,
        /// The code string that failed to resolve
        code: String,
    },

    /// Outcome is in neither the finishing nor the requires-further-action set
    #[error("Outcome {0} cannot be classified")]
    UnclassifiedOutcome(String),

    /// Mutation attempted on an erroneously registered case
    #[error("Case {case_id} is erroneously registered and cannot be changed")]
    TerminalState {
        /// Case that refused the mutation
        case_id: String,
    },

    /// Invalid flow state transition
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        /// Current state
        from: String,
        /// Attempted target state
        to: String,
    },

    /// Operation does not apply to this kind of case
    #[error("Operation {operation} is not supported for {kind} cases")]
    UnsupportedForKind {
        /// Operation name
        operation: &'static str,
        /// Case kind name
        kind: &'static str,
    },

    /// Business rule refused the operation
    #[error("Business rule violation: {rule}")]
    BusinessRuleViolation {
        /// Description of the violated rule
        rule: String,
    },

    /// Concurrency conflict
    #[error("Concurrency conflict: expected version {expected}, but found {actual}")]
    ConcurrencyConflict {
        /// Expected version
        expected: u64,
        /// Actual version
        actual: u64,
    },

    /// Case not found
    #[error("Case not found: {0}")]
    CaseNotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Downstream publisher rejected the event
    #[error("Failed to publish case event: {0}")]
    PublishFailed(String),
}

/// Result type for case operations
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl DomainError {
    /// Shorthand for a validation error
    pub fn invalid(msg: impl Into<String>) -> Self {
        DomainError::ValidationError(msg.into())
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::ValidationError(_) | DomainError::UnknownCode { .. }
        )
    }

    /// Check if this is a concurrency error
    pub fn is_concurrency_error(&self) -> bool {
        matches!(self, DomainError::ConcurrencyConflict { .. })
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::CaseNotFound(_))
    }
}
