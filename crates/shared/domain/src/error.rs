//! Domain-level errors.
//!
//! These errors represent business rule violations in the vacation policy and
//! related checks. They are independent of infrastructure concerns (HTTP,
//! persistence) and get converted to `common::AppError` at the service edge.

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Employee has not completed the minimum years of service
    #[error("at least {required} year(s) of service required, employee has {years}")]
    NotEligible { years: i64, required: i64 },

    /// Request dates are inverted or the span exceeds the per-request limit
    #[error("invalid date range: {0}")]
    InvalidDateRange(String),

    /// Requested days exceed the remaining balance for the management year
    #[error("insufficient balance: requested {requested}, remaining {remaining}")]
    InsufficientBalance { requested: i64, remaining: i64 },

    /// Request already approved or rejected; terminal states are immutable
    #[error("request already {0}")]
    AlreadyProcessed(String),

    /// Validation failed for a field or input
    #[error("validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create an invalid date range error
    pub fn invalid_date_range(msg: impl Into<String>) -> Self {
        DomainError::InvalidDateRange(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
