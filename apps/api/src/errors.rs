#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pdf_client::PdfError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Nothing here is fatal to the service: the page route stays serviceable
/// even when data loading, preferences, or export are entirely down.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A data source (resume or translation file) failed to load or parse.
    #[error("Data source error: {0}")]
    Data(String),

    /// The conversion collaborator failed to probe or convert.
    #[error("Export error: {0}")]
    Export(#[from] PdfError),

    /// A second export was triggered while one held the gate.
    #[error("An export is already in progress")]
    ExportInFlight,

    #[error("Preference store error: {0}")]
    Prefs(#[from] redis::RedisError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Data(msg) => {
                tracing::error!("Data source error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "DATA_ERROR",
                    "The site data could not be loaded".to_string(),
                )
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXPORT_ERROR",
                    "The CV export failed: the conversion engine is unavailable or rejected the document".to_string(),
                )
            }
            AppError::ExportInFlight => (
                StatusCode::CONFLICT,
                "EXPORT_IN_FLIGHT",
                "An export is already in progress, retry once it settles".to_string(),
            ),
            AppError::Prefs(e) => {
                tracing::error!("Preference store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PREFS_ERROR",
                    "The preference store is unavailable".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_in_flight_maps_to_conflict() {
        let response = AppError::ExportInFlight.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_data_error_maps_to_bad_gateway() {
        let response = AppError::Data("resume.json: boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
