//! Axum route handlers for document download and disposal.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/documents/:id
///
/// Streams the stored PDF as an attachment named `resume.pdf`.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let doc = state
        .documents
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;

    let bytes = tokio::fs::read(&doc.pdf_path)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to read PDF: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resume.pdf\"",
            ),
        ],
        Bytes::from(bytes),
    ))
}

/// DELETE /api/v1/documents/:id
///
/// Disposes of the document and its compilation workspace.
pub async fn handle_dispose(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !state.documents.dispose(id).await {
        return Err(AppError::NotFound(format!("Document {id} not found")));
    }
    Ok((StatusCode::OK, Json(json!({ "disposed": id }))))
}
