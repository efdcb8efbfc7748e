//! Feed content models.
//!
//! Memories and links are append-only: there is no edit or delete once
//! posted. Feed reads join the author for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Maximum memory length in characters.
pub const MAX_MEMORY_CHARS: usize = 500;

/// A shared text memory.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Memory {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A shared link.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Link {
    pub id: String,
    pub author_id: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// A memory joined with its author for feed display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedMemory {
    pub id: String,
    pub content: String,
    pub author_id: String,
    pub author_username: String,
    pub author_profile_pic: String,
    pub created_at: DateTime<Utc>,
}

/// A link joined with its author for feed display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedLink {
    pub id: String,
    pub url: String,
    pub author_id: String,
    pub author_username: String,
    pub author_profile_pic: String,
    pub created_at: DateTime<Utc>,
}
