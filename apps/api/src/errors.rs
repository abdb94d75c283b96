use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Export(e) => {
                let (status, code) = match e {
                    ExportError::InProgress => (StatusCode::CONFLICT, "EXPORT_IN_PROGRESS"),
                    ExportError::InputUnavailable(_) => {
                        (StatusCode::BAD_REQUEST, "EXPORT_INPUT_UNAVAILABLE")
                    }
                    ExportError::Serialization(_) => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "EXPORT_INVALID_RESUME")
                    }
                    ExportError::UnknownTheme(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_THEME"),
                    ExportError::Packaging(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_PACKAGING_FAILED")
                    }
                    ExportError::Delivery(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_DELIVERY_FAILED")
                    }
                };
                (status, code, e.user_message())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
