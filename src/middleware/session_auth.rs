//! Session-based authentication middleware.
//!
//! Validates session cookies for all authenticated routes.
//!
//! # Session Flow
//!
//! 1. User logs in with username and password
//! 2. Server creates a session row and sets the `keepsake_session` cookie
//! 3. Subsequent requests include the cookie, validated by this middleware
//! 4. Session expires after the configured duration or on logout
//!
//! # Security Model
//!
//! - Session IDs are cryptographically random (nanoid)
//! - Sessions are stored server-side in the database
//! - Cookie is HttpOnly, SameSite=Lax
//! - Sessions can be invalidated server-side (logout)

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{config::config, error::Error, AppState};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "keepsake_session";

/// User context injected into request extensions after successful session
/// validation.
#[derive(Clone, Debug)]
pub struct SessionUser {
    pub user_id: String,
    pub username: String,
    pub profile_pic: String,
    /// The session backing this request, so logout can revoke it.
    pub session_id: String,
}

/// Middleware that requires a valid session.
///
/// Extracts the session ID from the cookie, validates it against the
/// database, and injects `SessionUser` into request extensions.
///
/// # Errors
///
/// Returns 401 Unauthorized if:
/// - No session cookie present
/// - Session not found in database
/// - Session is expired
/// - User not found
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Error> {
    let session_id = jar
        .get(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .ok_or(Error::Unauthenticated)?;

    let session_user = validate_session(&state, &session_id).await?;

    req.extensions_mut().insert(session_user);

    Ok(next.run(req).await)
}

/// Validate a session ID and return the session user.
async fn validate_session(state: &AppState, session_id: &str) -> Result<SessionUser, Error> {
    let session = crate::db::get_session(&state.db, session_id)
        .await?
        .ok_or(Error::Unauthenticated)?;

    if session.is_expired() {
        // Clean up the stale row off the request path
        let db = state.db.clone();
        let sid = session_id.to_string();
        tokio::spawn(async move {
            let _ = crate::db::delete_session(&db, &sid).await;
        });
        return Err(Error::Unauthenticated);
    }

    let user = match crate::db::get_user(&state.db, &session.user_id).await {
        Ok(user) => user,
        // Session points at a user that no longer exists
        Err(Error::NotFound(_)) => return Err(Error::Unauthenticated),
        Err(e) => return Err(e),
    };

    // Extend the session once it is past the halfway point of its lifetime
    let max_age = chrono::Duration::seconds(config().session.max_age_seconds as i64);
    let halfway = chrono::Utc::now() + (max_age / 2);

    if session.expires_at < halfway {
        let new_expires = chrono::Utc::now() + max_age;
        let db = state.db.clone();
        let sid = session_id.to_string();
        tokio::spawn(async move {
            let _ = crate::db::extend_session(&db, &sid, new_expires).await;
        });
    }

    Ok(SessionUser {
        user_id: user.id,
        username: user.username,
        profile_pic: user.profile_pic,
        session_id: session_id.to_string(),
    })
}
