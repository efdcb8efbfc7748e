//! User database queries.

use crate::models::{new_id, now, User, DEFAULT_PROFILE_PIC};
use crate::{Error, Result};

use super::DbPool;

/// Input for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
}

/// Create a new user.
///
/// Username uniqueness is enforced by the UNIQUE constraint; violations
/// surface as `AlreadyExists`.
pub async fn create_user(pool: &DbPool, input: CreateUser) -> Result<User> {
    let ts = now();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, password_hash, profile_pic, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(&input.username)
    .bind(&input.password_hash)
    .bind(DEFAULT_PROFILE_PIC)
    .bind(ts)
    .bind(ts)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            Error::AlreadyExists(format!("username {} is taken", input.username))
        }
        _ => Error::Database(e),
    })
}

/// Get a user by ID.
pub async fn get_user(pool: &DbPool, id: &str) -> Result<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("User not found: {}", id)))
}

/// Get a user by username.
pub async fn get_user_by_username(pool: &DbPool, username: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
        .map_err(Error::Database)
}

/// Update a user's username.
///
/// Collisions hit the same UNIQUE constraint as registration.
pub async fn update_username(pool: &DbPool, id: &str, username: &str) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET username = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(now())
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            Error::AlreadyExists(format!("username {} is taken", username))
        }
        _ => Error::Database(e),
    })?
    .ok_or_else(|| Error::NotFound(format!("User not found: {}", id)))
}

/// Update a user's profile picture reference.
pub async fn update_profile_pic(pool: &DbPool, id: &str, filename: &str) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET profile_pic = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(filename)
    .bind(now())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("User not found: {}", id)))
}
