//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use domain_finance::FinanceError;

use crate::auth::AuthError;

/// One rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// The cause was logged under `error_id` and is not exposed
    #[error("Internal server error ({error_id})")]
    Internal { error_id: Uuid },
}

impl ApiError {
    /// Single-field validation error
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation(vec![FieldError::new(field, message)])
    }

    /// Logs `cause` under a fresh error id and returns the opaque error
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        let error_id = Uuid::new_v4();
        error!(%error_id, cause = %cause, "Request failed");
        ApiError::Internal { error_id }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_id: Option<Uuid>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "validation_error".to_string(),
                    message: "Request validation failed".to_string(),
                    details: Some(details),
                    error_id: None,
                },
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "not_found".to_string(),
                    message,
                    details: None,
                    error_id: None,
                },
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: "unauthorized".to_string(),
                    message: "Unauthorized".to_string(),
                    details: None,
                    error_id: None,
                },
            ),
            ApiError::Internal { error_id } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "internal_error".to_string(),
                    message: "An internal error occurred".to_string(),
                    details: None,
                    error_id: Some(error_id),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<FinanceError> for ApiError {
    fn from(err: FinanceError) -> Self {
        match err {
            FinanceError::Validation { field, message } => ApiError::invalid(field, message),
            FinanceError::ExpenseNotFound(id) => ApiError::NotFound(format!("Expense {} not found", id)),
            other => ApiError::internal(other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(_: AuthError) -> Self {
        ApiError::Unauthorized
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = if field == "__all__" { "body".to_string() } else { field.to_string() };
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    FieldError::new(field.clone(), message)
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::Validation(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ExpenseId, PortError};

    #[test]
    fn test_finance_errors_map_to_status() {
        let not_found: ApiError = FinanceError::ExpenseNotFound(ExpenseId::new()).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let invalid: ApiError = FinanceError::validation("amount", "must be greater than zero").into();
        assert!(matches!(&invalid, ApiError::Validation(d) if d[0].field == "amount"));
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let store: ApiError = FinanceError::Store(PortError::connection("refused")).into();
        assert!(matches!(store, ApiError::Internal { .. }));
        assert_eq!(store.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_corrupt_record_is_internal() {
        let err: ApiError = FinanceError::corrupt("USER#u/EXPENSE#x", "missing EXPENSE_AMOUNT").into();
        assert!(matches!(err, ApiError::Internal { .. }));
    }

    #[test]
    fn test_overflow_is_internal() {
        let err: ApiError = FinanceError::Overflow("category sum").into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
