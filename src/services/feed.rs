//! Content feed service.
//!
//! The feed is global: every authenticated user sees all memories and
//! links, newest first. Content is append-only.

use tracing::debug;

use crate::db::{self, DbPool};
use crate::models::{FeedLink, FeedMemory, Link, Memory, MAX_MEMORY_CHARS};
use crate::{Error, Result};

#[derive(Clone)]
pub struct FeedService {
    db: DbPool,
}

impl FeedService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Share a text memory. Length is bounded in characters, not bytes.
    pub async fn post_memory(&self, author_id: &str, content: &str) -> Result<Memory> {
        let len = content.chars().count();
        if len == 0 {
            return Err(Error::Validation("memory must not be empty".to_string()));
        }
        if len > MAX_MEMORY_CHARS {
            return Err(Error::Validation(format!(
                "memory must be at most {} characters",
                MAX_MEMORY_CHARS
            )));
        }

        let memory = db::create_memory(&self.db, author_id, content).await?;
        debug!(memory_id = %memory.id, "memory posted");
        Ok(memory)
    }

    /// Share a link. The URL is an opaque string; no format validation.
    pub async fn post_link(&self, author_id: &str, url: &str) -> Result<Link> {
        if url.is_empty() {
            return Err(Error::Validation("link URL must not be empty".to_string()));
        }

        let link = db::create_link(&self.db, author_id, url).await?;
        debug!(link_id = %link.id, "link posted");
        Ok(link)
    }

    /// The global feed: memories and links, each newest first.
    pub async fn list_feed(&self) -> Result<(Vec<FeedMemory>, Vec<FeedLink>)> {
        let memories = db::list_memories(&self.db).await?;
        let links = db::list_links(&self.db).await?;
        Ok((memories, links))
    }
}
