//! Friendship edge database queries.
//!
//! Edges are directed (sender asked receiver) with a status flag. Pair
//! uniqueness is direction-agnostic: the unique index on the unordered
//! pair backstops the application-level both-directions check, so two
//! racing requests between the same users cannot create two edges.

use crate::models::{new_id, now, Friendship, FriendshipStatus, PendingRequest, User};
use crate::{Error, Result};

use super::DbPool;

/// Create a pending friendship edge from sender to receiver.
pub async fn create_friendship(
    pool: &DbPool,
    sender_id: &str,
    receiver_id: &str,
) -> Result<Friendship> {
    sqlx::query_as::<_, Friendship>(
        r#"
        INSERT INTO friendships (id, sender_id, receiver_id, status, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(sender_id)
    .bind(receiver_id)
    .bind(FriendshipStatus::Pending.as_str())
    .bind(now())
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            Error::AlreadyExists("friend request already exists for this user".to_string())
        }
        _ => Error::Database(e),
    })
}

/// Get a friendship edge by ID.
pub async fn get_friendship(pool: &DbPool, id: &str) -> Result<Friendship> {
    sqlx::query_as::<_, Friendship>("SELECT * FROM friendships WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Friend request not found: {}", id)))
}

/// Find the edge between two users, in either direction and any status.
pub async fn find_friendship_between(
    pool: &DbPool,
    user_a: &str,
    user_b: &str,
) -> Result<Option<Friendship>> {
    sqlx::query_as::<_, Friendship>(
        r#"
        SELECT * FROM friendships
        WHERE (sender_id = ? AND receiver_id = ?)
           OR (sender_id = ? AND receiver_id = ?)
        "#,
    )
    .bind(user_a)
    .bind(user_b)
    .bind(user_b)
    .bind(user_a)
    .fetch_optional(pool)
    .await
    .map_err(Error::Database)
}

/// Mark an edge accepted.
pub async fn accept_friendship(pool: &DbPool, id: &str) -> Result<Friendship> {
    sqlx::query_as::<_, Friendship>(
        r#"
        UPDATE friendships SET status = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(FriendshipStatus::Accepted.as_str())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("Friend request not found: {}", id)))
}

/// Pending requests the user has sent, joined with the receiver's username.
pub async fn list_sent_pending(pool: &DbPool, user_id: &str) -> Result<Vec<PendingRequest>> {
    sqlx::query_as::<_, PendingRequest>(
        r#"
        SELECT f.id, u.id AS user_id, u.username, f.created_at
        FROM friendships f
        JOIN users u ON u.id = f.receiver_id
        WHERE f.sender_id = ? AND f.status = 'pending'
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(Error::Database)
}

/// Pending requests the user has received, joined with the sender's username.
pub async fn list_received_pending(pool: &DbPool, user_id: &str) -> Result<Vec<PendingRequest>> {
    sqlx::query_as::<_, PendingRequest>(
        r#"
        SELECT f.id, u.id AS user_id, u.username, f.created_at
        FROM friendships f
        JOIN users u ON u.id = f.sender_id
        WHERE f.receiver_id = ? AND f.status = 'pending'
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(Error::Database)
}

/// Users on the other end of accepted edges, in either direction.
pub async fn list_friends(pool: &DbPool, user_id: &str) -> Result<Vec<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT u.* FROM friendships f
        JOIN users u
          ON u.id = CASE WHEN f.sender_id = ? THEN f.receiver_id ELSE f.sender_id END
        WHERE (f.sender_id = ? OR f.receiver_id = ?) AND f.status = 'accepted'
        ORDER BY u.username
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(Error::Database)
}
