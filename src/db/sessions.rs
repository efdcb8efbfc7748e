//! Session database queries.
//!
//! Sessions are stored server-side and referenced by the session cookie.
//! Session ids are cryptographically random (nanoid).

use chrono::{DateTime, Utc};

use crate::models::{now, Session};
use crate::{Error, Result};

use super::DbPool;

/// Create a new session for a user.
pub async fn create_session(
    pool: &DbPool,
    user_id: &str,
    expires_at: DateTime<Utc>,
) -> Result<Session> {
    sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (id, user_id, created_at, expires_at)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(nanoid::nanoid!(32))
    .bind(user_id)
    .bind(now())
    .bind(expires_at)
    .fetch_one(pool)
    .await
    .map_err(Error::Database)
}

/// Get a session by ID.
pub async fn get_session(pool: &DbPool, id: &str) -> Result<Option<Session>> {
    sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Error::Database)
}

/// Delete a session (logout).
pub async fn delete_session(pool: &DbPool, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Push a session's expiry forward.
pub async fn extend_session(pool: &DbPool, id: &str, expires_at: DateTime<Utc>) -> Result<()> {
    sqlx::query("UPDATE sessions SET expires_at = ? WHERE id = ?")
        .bind(expires_at)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete expired sessions.
pub async fn cleanup_expired_sessions(pool: &DbPool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
        .bind(now())
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_user, init_pool, initialize_schema, CreateUser};
    use chrono::Duration;

    async fn setup() -> (DbPool, String) {
        let pool = init_pool(":memory:").await.unwrap();
        initialize_schema(&pool).await.unwrap();
        let user = create_user(
            &pool,
            CreateUser {
                username: "ada".to_string(),
                password_hash: "$argon2id$test".to_string(),
            },
        )
        .await
        .unwrap();
        (pool, user.id)
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let (pool, user_id) = setup().await;

        let session = create_session(&pool, &user_id, Utc::now() + Duration::hours(24))
            .await
            .unwrap();
        assert_eq!(session.user_id, user_id);
        assert!(!session.is_expired());

        let fetched = get_session(&pool, &session.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, session.id);

        delete_session(&pool, &session.id).await.unwrap();
        assert!(get_session(&pool, &session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let (pool, user_id) = setup().await;

        create_session(&pool, &user_id, Utc::now() - Duration::hours(1))
            .await
            .unwrap();
        let live = create_session(&pool, &user_id, Utc::now() + Duration::hours(1))
            .await
            .unwrap();

        let removed = cleanup_expired_sessions(&pool).await.unwrap();
        assert_eq!(removed, 1);
        assert!(get_session(&pool, &live.id).await.unwrap().is_some());
    }
}
