//! Middleware for Keepsake.
//!
//! Session-cookie authentication: every state-changing route requires a
//! valid server-side session.

mod session_auth;

pub use session_auth::{require_session, SessionUser, SESSION_COOKIE_NAME};
