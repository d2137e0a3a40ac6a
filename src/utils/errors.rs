//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("PDF not generated: {0}")]
    PdfNotGenerated(String),

    #[error("Rendering error: {0}")]
    Rendering(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                tracing::error!("❌ Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Database Error",
                        "An error occurred while accessing the database".to_string(),
                        "DB_ERROR",
                    )
                    .with_details(json!({ "sql_error": e.to_string() })),
                )
            }

            AppError::Store(msg) => {
                tracing::error!("❌ Store error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Database Error",
                        "An error occurred while accessing the record store".to_string(),
                        "DB_ERROR",
                    )
                    .with_details(json!({ "store_error": msg })),
                )
            }

            AppError::Validation(e) => {
                tracing::warn!("⚠️ Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(
                        "Validation Error",
                        "The provided data is invalid".to_string(),
                        "VALIDATION_ERROR",
                    )
                    .with_details(json!(e)),
                )
            }

            AppError::NotFound(msg) => {
                tracing::warn!("⚠️ Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new("Not Found", msg, "NOT_FOUND"),
                )
            }

            AppError::BadRequest(msg) => {
                tracing::warn!("⚠️ Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"),
                )
            }

            AppError::ConfirmationRequired(msg) => {
                tracing::info!("✋ Confirmation required: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Confirmation Required", msg, "CONFIRMATION_REQUIRED"),
                )
            }

            AppError::PdfNotGenerated(msg) => {
                tracing::warn!("⚠️ PDF not generated: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("PDF Not Generated", msg, "PDF_NOT_GENERATED"),
                )
            }

            AppError::Rendering(msg) => {
                tracing::error!("❌ Rendering error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Rendering Error",
                        "The LR document could not be rendered".to_string(),
                        "RENDER_ERROR",
                    )
                    .with_details(json!({ "render_error": msg })),
                )
            }

            AppError::Storage(msg) => {
                tracing::error!("❌ Storage error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(
                        "Storage Error",
                        "An error occurred while uploading the file".to_string(),
                        "STORAGE_ERROR",
                    )
                    .with_details(json!({ "storage_error": msg })),
                )
            }

            AppError::ExternalApi(msg) => {
                tracing::error!("❌ External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(
                        "External API Error",
                        "An error occurred while communicating with external service".to_string(),
                        "EXTERNAL_API_ERROR",
                    )
                    .with_details(json!({ "external_api_error": msg })),
                )
            }

            AppError::ServiceUnavailable(msg) => {
                tracing::error!("❌ Service unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new("Service Unavailable", msg, "SERVICE_UNAVAILABLE"),
                )
            }

            AppError::PayloadTooLarge(msg) => {
                tracing::warn!("⚠️ Payload too large: {}", msg);
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    ErrorResponse::new("Payload Too Large", msg, "PAYLOAD_TOO_LARGE"),
                )
            }

            AppError::UnsupportedMediaType(msg) => {
                tracing::warn!("⚠️ Unsupported media type: {}", msg);
                (
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    ErrorResponse::new("Unsupported Media Type", msg, "UNSUPPORTED_MEDIA_TYPE"),
                )
            }

            AppError::Internal(msg) => {
                tracing::error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Internal Server Error",
                        "An unexpected error occurred".to_string(),
                        "INTERNAL_ERROR",
                    )
                    .with_details(json!({ "internal_error": msg })),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, code: &'static str, message: &str) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, field_error(code, message));
    AppError::Validation(errors)
}

/// Construir un `ValidationError` con mensaje legible
pub fn field_error(code: &'static str, message: &str) -> validator::ValidationError {
    let mut error = validator::ValidationError::new(code);
    error.message = Some(message.to_string().into());
    error
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::PdfNotGenerated("x".into()), StatusCode::CONFLICT),
            (AppError::ConfirmationRequired("x".into()), StatusCode::BAD_REQUEST),
            (AppError::ServiceUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (AppError::ExternalApi("x".into()), StatusCode::BAD_GATEWAY),
            (AppError::PayloadTooLarge("x".into()), StatusCode::PAYLOAD_TOO_LARGE),
            (validation_error("lr_no", "required", "LR NO is required"), StatusCode::BAD_REQUEST),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_validation_error_carries_message() {
        match validation_error("truck_no", "required", "TRUCK NO is required") {
            AppError::Validation(errors) => {
                let fields = errors.field_errors();
                let error = &fields["truck_no"][0];
                assert_eq!(error.code, "required");
                assert_eq!(error.message.as_deref(), Some("TRUCK NO is required"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
