//! Error handling for the Print Shop Console server
//!
//! Maps workflow failures onto consistent JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::WorkflowError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Validation error: {message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    // Business rule violations
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Insufficient inventory: {0}")]
    InsufficientInventory(String),

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        let message = err.to_string();
        match err {
            WorkflowError::NotFound { entity, id } => AppError::NotFound(format!("{} {}", entity, id)),
            WorkflowError::Precondition(_) => AppError::Precondition(message),
            WorkflowError::InvalidTransition { .. } => AppError::InvalidStateTransition(message),
            WorkflowError::InsufficientInventory { .. } => AppError::InsufficientInventory(message),
            WorkflowError::ResourceUnavailable(_) => AppError::ResourceUnavailable(message),
            WorkflowError::Validation(msg) => AppError::Validation {
                field: None,
                message: msg,
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors.field_errors().keys().next().map(|field| field.to_string());
        AppError::Validation {
            field,
            message: errors.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            AppError::Precondition(_) => (StatusCode::CONFLICT, "PRECONDITION_FAILED"),
            AppError::InvalidStateTransition(_) => (StatusCode::CONFLICT, "INVALID_STATE_TRANSITION"),
            AppError::InsufficientInventory(_) => (StatusCode::CONFLICT, "INSUFFICIENT_INVENTORY"),
            AppError::ResourceUnavailable(_) => (StatusCode::CONFLICT, "RESOURCE_UNAVAILABLE"),
            AppError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let (message, field) = match &self {
            AppError::Validation { field, message } => (message.clone(), field.clone()),
            // Internal details stay in the log
            AppError::InternalError(_) => ("An internal server error occurred".to_string(), None),
            other => (other.to_string(), None),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (
            status,
            Json(ErrorResponse {
                error: ErrorDetail {
                    code: code.to_string(),
                    message,
                    field,
                },
            }),
        )
            .into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::EntityKind;
    use uuid::Uuid;

    #[test]
    fn test_not_found_maps_to_404() {
        let err: AppError = WorkflowError::NotFound {
            entity: EntityKind::Order,
            id: Uuid::nil(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_business_rules_map_to_409() {
        let err: AppError = WorkflowError::Precondition("order has no shortage".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_maps_to_422() {
        let err: AppError = WorkflowError::Validation("Supplier name is required".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
