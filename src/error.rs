use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;
use crate::validation::FieldError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Missing(id) => AppError::NotFound(format!("solicitud {id} no existe")),
            StoreError::InvalidPatch(msg) => AppError::BadRequest(msg),
            StoreError::Backend(msg) => AppError::Storage(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(fields) => {
                let body = Json(json!({
                    "error": "Datos inválidos.",
                    "fields": fields,
                }));
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            AppError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, &msg),
            AppError::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
            AppError::Storage(msg) => {
                // The cause goes to the operational log; the caller gets a
                // generic retry-suggesting message.
                tracing::error!(error = %msg, "storage operation failed");
                error_response(
                    StatusCode::BAD_GATEWAY,
                    "No se pudo completar la operación. Intente nuevamente.",
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, &msg)
            }
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = Json(json!({
        "error": message
    }));
    (status, body).into_response()
}
