//! Profile Routes
//!
//! The current user's profile: username and profile picture. Both updates
//! act on the session user only; there is no way to target another
//! account.
//!
//! Routes:
//! - GET /profile - Current user's profile
//! - POST /profile - Multipart update: optional "username" field and/or
//!   "file" part (new profile picture)

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::{routing::get, Extension, Json, Router};
use serde::Serialize;

use crate::api::auth::UserResponse;
use crate::middleware::SessionUser;
use crate::models::User;
use crate::{config, AppState, Error, Result};

/// Build profile routes.
pub fn routes() -> Router<AppState> {
    let body_limit = config::config().uploads.max_file_size + 64 * 1024;

    Router::new()
        .route("/profile", get(get_profile).post(update_profile))
        .layer(DefaultBodyLimit::max(body_limit))
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// The current user's profile.
///
/// GET /profile
async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<ProfileResponse>> {
    let user = crate::db::get_user(&state.db, &session.user_id).await?;

    Ok(Json(ProfileResponse {
        user: user.into(),
        message: String::new(),
    }))
}

/// Update the current user's username and/or profile picture.
///
/// POST /profile
///
/// Accepts a multipart form with an optional "username" text field and an
/// optional "file" part. Either alone is fine; an empty form changes
/// nothing.
async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    mut multipart: Multipart,
) -> Result<Json<ProfileResponse>> {
    let mut updated: Option<User> = None;
    let mut changes: Vec<&str> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidInput(format!("malformed multipart body: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("file") => {
                let filename = match field.file_name().map(|s| s.to_string()) {
                    Some(name) if !name.is_empty() => name,
                    // An empty file input posts a nameless part; skip it
                    _ => continue,
                };

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::InvalidInput(format!("failed to read upload: {}", e)))?;

                let stored = state.uploads.store(&filename, &data).await?;
                updated =
                    Some(state.auth.update_profile_pic(&session.user_id, &stored).await?);
                changes.push("picture");
            }
            Some("username") => {
                let username = field
                    .text()
                    .await
                    .map_err(|e| Error::InvalidInput(format!("failed to read field: {}", e)))?;

                if username.is_empty() {
                    continue;
                }

                updated =
                    Some(state.auth.update_username(&session.user_id, &username).await?);
                changes.push("username");
            }
            _ => continue,
        }
    }

    let user = match updated {
        Some(user) => user,
        None => crate::db::get_user(&state.db, &session.user_id).await?,
    };

    let message = if changes.is_empty() {
        "Nothing to update".to_string()
    } else {
        format!("Updated {}", changes.join(" and "))
    };

    Ok(Json(ProfileResponse {
        user: user.into(),
        message,
    }))
}
