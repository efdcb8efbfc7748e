//! User and session models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Profile picture filename assigned to accounts that never uploaded one.
pub const DEFAULT_PROFILE_PIC: &str = "default.jpg";

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,

    /// PHC-format argon2 hash. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Filename of the profile picture under the upload directory.
    pub profile_pic: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Server-side web session, referenced by the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
