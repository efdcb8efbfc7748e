//! API Routes for Keepsake
//!
//! This module combines all API routes into a single router.
//! Routes are organized by domain and apply appropriate middleware.

mod auth;
mod feed;
mod friends;
mod profile;
pub mod status;
mod uploads;

use axum::routing::get;
use axum::Router;

use crate::middleware::require_session;
use crate::AppState;

/// Build the complete API router.
///
/// Route structure:
/// - /register, /login - Account creation and login (public)
/// - /health - Liveness (public)
/// - everything else - session-protected
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health endpoint (public)
        .merge(status::routes())
        // Registration and login (public)
        .merge(auth::routes())
        // Session-protected application routes
        .merge(protected_routes(state))
}

/// Protected routes that require a valid session.
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Feed: read and post
        .merge(feed::routes())
        // Friendship requests and listings
        .merge(friends::routes())
        // Image uploads
        .merge(uploads::routes())
        // Profile: username and picture
        .merge(profile::routes())
        // Logout needs the session it is about to revoke
        .route("/logout", get(auth::logout))
        .layer(axum::middleware::from_fn_with_state(state, require_session))
}
