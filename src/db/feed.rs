//! Feed content database queries.
//!
//! Memories and links are append-only. Feed reads join the author row so
//! the caller gets usernames and profile pictures in one query.

use crate::models::{new_id, now, FeedLink, FeedMemory, Link, Memory};
use crate::{Error, Result};

use super::DbPool;

/// Append a memory.
pub async fn create_memory(pool: &DbPool, author_id: &str, content: &str) -> Result<Memory> {
    sqlx::query_as::<_, Memory>(
        r#"
        INSERT INTO memories (id, author_id, content, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(author_id)
    .bind(content)
    .bind(now())
    .fetch_one(pool)
    .await
    .map_err(Error::Database)
}

/// Append a link.
pub async fn create_link(pool: &DbPool, author_id: &str, url: &str) -> Result<Link> {
    sqlx::query_as::<_, Link>(
        r#"
        INSERT INTO links (id, author_id, url, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(author_id)
    .bind(url)
    .bind(now())
    .fetch_one(pool)
    .await
    .map_err(Error::Database)
}

/// All memories, newest first, joined with their authors.
pub async fn list_memories(pool: &DbPool) -> Result<Vec<FeedMemory>> {
    sqlx::query_as::<_, FeedMemory>(
        r#"
        SELECT m.id, m.content, m.author_id,
               u.username AS author_username, u.profile_pic AS author_profile_pic,
               m.created_at
        FROM memories m
        JOIN users u ON u.id = m.author_id
        ORDER BY m.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(Error::Database)
}

/// All links, newest first, joined with their authors.
pub async fn list_links(pool: &DbPool) -> Result<Vec<FeedLink>> {
    sqlx::query_as::<_, FeedLink>(
        r#"
        SELECT l.id, l.url, l.author_id,
               u.username AS author_username, u.profile_pic AS author_profile_pic,
               l.created_at
        FROM links l
        JOIN users u ON u.id = l.author_id
        ORDER BY l.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(Error::Database)
}
