//! Upload Routes
//!
//! Image uploads. Files land in the configured upload directory with no
//! database record; the feed lists their filenames.
//!
//! Routes:
//! - GET /upload - List uploaded image filenames
//! - POST /upload - Multipart image upload (field name "file")

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::{config, AppState, Error, Result};

/// Build upload routes.
pub fn routes() -> Router<AppState> {
    // Leave headroom above the stored-file cap for multipart framing
    let body_limit = config::config().uploads.max_file_size + 64 * 1024;

    Router::new()
        .route("/upload", get(list_uploads).post(upload_file))
        .layer(DefaultBodyLimit::max(body_limit))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ListUploadsResponse {
    pub images: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// List uploaded images.
///
/// GET /upload
async fn list_uploads(State(state): State<AppState>) -> Result<Json<ListUploadsResponse>> {
    let images = state.uploads.list().await?;
    Ok(Json(ListUploadsResponse { images }))
}

/// Store an uploaded image.
///
/// POST /upload
async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidInput(format!("malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Validation("no selected file".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::InvalidInput(format!("failed to read upload: {}", e)))?;

        let stored = state.uploads.store(&filename, &data).await?;

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                filename: stored,
                message: "Image uploaded".to_string(),
            }),
        ));
    }

    Err(Error::Validation("no file part".to_string()))
}
