//! Authentication service.
//!
//! Registration, credential verification, and server-side session issue
//! and revocation. Passwords are hashed with Argon2id and stored as PHC
//! strings; the plaintext never touches the database.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Duration;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::db::{self, DbPool};
use crate::models::{now, Session, User};
use crate::{Error, Result};

/// Username length bounds for registration and renames.
const USERNAME_MIN: usize = 2;
const USERNAME_MAX: usize = 20;

#[derive(Clone)]
pub struct AuthService {
    db: DbPool,
    session: SessionConfig,
}

impl AuthService {
    pub fn new(db: DbPool, session: SessionConfig) -> Self {
        Self { db, session }
    }

    /// Register a new account.
    ///
    /// Fails with `AlreadyExists` when the username is taken (storage-layer
    /// UNIQUE constraint, translated in the db module).
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        validate_username(username)?;
        if password.is_empty() {
            return Err(Error::Validation("password must not be empty".to_string()));
        }

        let password_hash = hash_password(password)?;
        let user = db::create_user(
            &self.db,
            db::CreateUser {
                username: username.to_string(),
                password_hash,
            },
        )
        .await?;

        info!(user_id = %user.id, username = %user.username, "registered new user");
        Ok(user)
    }

    /// Verify credentials.
    ///
    /// Unknown usernames and wrong passwords produce the same error, so the
    /// response does not reveal which usernames exist.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let user = db::get_user_by_username(&self.db, username)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        debug!(user_id = %user.id, "authenticated");
        Ok(user)
    }

    /// Issue a session for a user.
    pub async fn create_session(&self, user: &User) -> Result<Session> {
        let expires_at = now() + Duration::seconds(self.session.max_age_seconds as i64);
        db::create_session(&self.db, &user.id, expires_at).await
    }

    /// Revoke a session (logout). Unknown ids are a no-op.
    pub async fn destroy_session(&self, session_id: &str) -> Result<()> {
        db::delete_session(&self.db, session_id).await
    }

    /// Rename the current user. Collisions conflict like registration.
    pub async fn update_username(&self, user_id: &str, username: &str) -> Result<User> {
        validate_username(username)?;
        db::update_username(&self.db, user_id, username).await
    }

    /// Point the current user's profile picture at an uploaded file.
    pub async fn update_profile_pic(&self, user_id: &str, filename: &str) -> Result<User> {
        db::update_profile_pic(&self.db, user_id, filename).await
    }
}

fn validate_username(username: &str) -> Result<()> {
    let len = username.chars().count();
    if len < USERNAME_MIN || len > USERNAME_MAX {
        return Err(Error::Validation(format!(
            "username must be between {} and {} characters",
            USERNAME_MIN, USERNAME_MAX
        )));
    }
    Ok(())
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| Error::Internal(format!("password hashing failed: {}", e)))
}

fn verify_password(password: &str, stored_hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| Error::Internal(format!("stored hash unreadable: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| Error::InvalidCredentials)
}
