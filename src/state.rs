//! Application state for Keepsake.
//!
//! Contains the shared state that is passed to all handlers. Fields are
//! public so tests can assemble a state over an in-memory database.

use crate::db::DbPool;
use crate::services::{AuthService, FeedService, FriendshipService, UploadService};
use crate::{config, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DbPool,
    /// Registration, login, and session management.
    pub auth: AuthService,
    /// Friend requests and the friends relation.
    pub friendships: FriendshipService,
    /// Memories and links.
    pub feed: FeedService,
    /// Image upload storage.
    pub uploads: UploadService,
}

impl AppState {
    /// Create a new application state from the global configuration.
    pub async fn new() -> Result<Self> {
        let config = config::config();

        let db = crate::db::init_pool(&config.database.path).await?;
        crate::db::initialize_schema(&db).await?;

        let uploads = UploadService::new(&config.uploads);
        uploads.ensure_dir().await?;

        Ok(Self::from_parts(db, config.session.clone(), uploads))
    }

    /// Assemble a state from explicit parts (used by tests).
    pub fn from_parts(
        db: DbPool,
        session: config::SessionConfig,
        uploads: UploadService,
    ) -> Self {
        Self {
            auth: AuthService::new(db.clone(), session),
            friendships: FriendshipService::new(db.clone()),
            feed: FeedService::new(db.clone()),
            uploads,
            db,
        }
    }
}
