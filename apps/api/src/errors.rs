use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::render::RenderError;

pub const MISSING_INPUT_MESSAGE: &str = "Please provide both resume text and job description.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing input: resume text and job description are both required")]
    MissingInput,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Image staging failed: {0}")]
    ImageStaging(#[source] std::io::Error),

    #[error("Rendering failed: {0}")]
    Rendering(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Malformed form upload: {}", e.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingInput => (
                StatusCode::BAD_REQUEST,
                "MISSING_INPUT",
                MISSING_INPUT_MESSAGE.to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ImageStaging(e) => {
                tracing::error!("Image staging error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IMAGE_STAGING_ERROR",
                    "The uploaded image could not be stored".to_string(),
                )
            }
            AppError::Rendering(e) => {
                tracing::error!("Rendering error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDERING_ERROR",
                    "The resume document could not be rendered".to_string(),
                )
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
