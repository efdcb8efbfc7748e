//! Authentication Routes
//!
//! Registration, login, and logout.
//!
//! Routes:
//! - POST /register - Create an account
//! - POST /login - Verify credentials and set the session cookie
//! - GET /logout - Revoke the session and clear the cookie (protected,
//!   mounted under the session-guarded router in api::mod)

use axum::http::StatusCode;
use axum::{extract::State, routing::post, Extension, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::{SessionUser, SESSION_COOKIE_NAME};
use crate::models::User;
use crate::{AppState, Error, Result};

/// Build public auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub profile_pic: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            profile_pic: user.profile_pic,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Create an account.
///
/// POST /register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    if req.password != req.confirm_password {
        return Err(Error::Validation("passwords do not match".to_string()));
    }

    let user = state.auth.register(&req.username, &req.password).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Verify credentials and establish a session.
///
/// POST /login
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let user = state.auth.authenticate(&req.username, &req.password).await?;
    let session = state.auth.create_session(&user).await?;

    let cookie = Cookie::build((SESSION_COOKIE_NAME, session.id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok((jar.add(cookie), Json(LoginResponse { user: user.into() })))
}

/// Revoke the current session.
///
/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>)> {
    state.auth.destroy_session(&user.session_id).await?;

    let jar = jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));

    Ok((
        jar,
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    ))
}
