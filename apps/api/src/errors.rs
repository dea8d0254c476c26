use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("GitHub error: {0}")]
    GitHub(String),

    #[error("Compilation failed: {diagnostics}")]
    CompilationFailed {
        diagnostics: String,
        latex_source: Option<String>,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::GitHub(msg) => {
                tracing::error!("GitHub error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GITHUB_ERROR",
                    "Failed to fetch GitHub projects".to_string(),
                )
            }
            AppError::CompilationFailed {
                diagnostics,
                latex_source,
            } => {
                tracing::warn!("LaTeX compilation failed");
                // Diagnostics are surfaced verbatim so the caller can debug
                // the generated markup. The LaTeX source rides along when the
                // pipeline produced it before failing.
                let body = Json(json!({
                    "error": {
                        "code": "COMPILATION_FAILED",
                        "message": diagnostics
                    },
                    "latex_source": latex_source
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
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
