//! Unified error handling for the HTTP services.
//!
//! Provides a single error taxonomy shared by every microservice, with
//! automatic conversion to structured JSON responses. All failures surface
//! as non-2xx statuses with an `{ "error": { "code", "message" } }` body;
//! nothing is retried automatically.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types shared by all services.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    // Tenant resolution
    #[error("Tenant could not be identified from the caller's email")]
    TenantNotIdentified,

    #[error("Tenant not found")]
    TenantNotFound,

    #[error("User not found")]
    UserNotFound,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    /// Deliberately does not reveal whether the resource exists or merely
    /// belongs to someone else
    #[error("Request not found or not yours")]
    NotFoundOrUnauthorized,

    // Vacation policy
    #[error("No active contract found for employee")]
    NoActiveContract,

    #[error("At least {required} year(s) of service required, employee has {years}")]
    NotEligible { years: i64, required: i64 },

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Insufficient balance: requested {requested} day(s), {remaining} remaining")]
    InsufficientBalance { requested: i64, remaining: i64 },

    #[error("Request already {0}")]
    AlreadyProcessed(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Upstream data service returned status {status}")]
    Upstream { status: u16, detail: String },

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::TenantNotIdentified => "TENANT_NOT_IDENTIFIED",
            AppError::TenantNotFound => "TENANT_NOT_FOUND",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::NotFound => "NOT_FOUND",
            AppError::NotFoundOrUnauthorized => "NOT_FOUND_OR_UNAUTHORIZED",
            AppError::NoActiveContract => "NO_ACTIVE_CONTRACT",
            AppError::NotEligible { .. } => "NOT_ELIGIBLE",
            AppError::InvalidDateRange(_) => "INVALID_DATE_RANGE",
            AppError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            AppError::AlreadyProcessed(_) => "ALREADY_PROCESSED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Upstream { .. } => "UPSTREAM_SERVICE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::TenantNotIdentified
            | AppError::InvalidDateRange(_)
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::TenantNotFound
            | AppError::UserNotFound
            | AppError::NotFound
            | AppError::NotFoundOrUnauthorized => StatusCode::NOT_FOUND,
            AppError::NoActiveContract
            | AppError::NotEligible { .. }
            | AppError::InsufficientBalance { .. }
            | AppError::AlreadyProcessed(_) => StatusCode::CONFLICT,
            AppError::Upstream { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Hide details for upstream/internal errors
            AppError::Upstream { status, detail } => {
                tracing::error!(status = *status, detail = %detail, "upstream data service error");
                "The data service failed to process the request".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use the display message for client errors
            _ => self.to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn upstream(status: u16, detail: impl Into<String>) -> Self {
        AppError::Upstream {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotEligible { years, required } => {
                AppError::NotEligible { years, required }
            }
            DomainError::InvalidDateRange(msg) => AppError::InvalidDateRange(msg),
            DomainError::InsufficientBalance {
                requested,
                remaining,
            } => AppError::InsufficientBalance {
                requested,
                remaining,
            },
            DomainError::AlreadyProcessed(status) => AppError::AlreadyProcessed(status),
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(AppError::TenantNotIdentified.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::TenantNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::AlreadyProcessed("aprobada".into()).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn upstream_failures_map_to_500_and_hide_detail() {
        let err = AppError::upstream(503, "connection refused");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.user_message().contains("connection refused"));
    }

    #[test]
    fn domain_errors_convert_with_fields_intact() {
        let err: AppError = DomainError::InsufficientBalance {
            requested: 10,
            remaining: 4,
        }
        .into();
        assert!(matches!(
            err,
            AppError::InsufficientBalance { requested: 10, remaining: 4 }
        ));
    }
}
