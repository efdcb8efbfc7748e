//! Feed Routes
//!
//! The shared feed: memories and links from every user, newest first,
//! plus the filenames of uploaded images.
//!
//! Routes:
//! - GET / - The feed
//! - POST /post_memory - Share a text memory
//! - POST /post_link - Share a link

use axum::http::StatusCode;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::SessionUser;
use crate::models::{FeedLink, FeedMemory};
use crate::services::embed::youtube_embed_url;
use crate::{AppState, Result};

/// Build feed routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_feed))
        .route("/post_memory", post(post_memory))
        .route("/post_link", post(post_link))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PostMemoryRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct PostLinkRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct MemoryResponse {
    pub id: String,
    pub content: String,
    pub author_id: String,
    pub author_username: String,
    pub author_profile_pic: String,
    pub created_at: DateTime<Utc>,
}

impl From<FeedMemory> for MemoryResponse {
    fn from(m: FeedMemory) -> Self {
        MemoryResponse {
            id: m.id,
            content: m.content,
            author_id: m.author_id,
            author_username: m.author_username,
            author_profile_pic: m.author_profile_pic,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: String,
    pub url: String,
    /// Canonical embeddable form when the URL looks like a YouTube video.
    pub embed_url: Option<String>,
    pub author_id: String,
    pub author_username: String,
    pub author_profile_pic: String,
    pub created_at: DateTime<Utc>,
}

impl From<FeedLink> for LinkResponse {
    fn from(l: FeedLink) -> Self {
        let embed_url = youtube_embed_url(&l.url);
        LinkResponse {
            id: l.id,
            url: l.url,
            embed_url,
            author_id: l.author_id,
            author_username: l.author_username,
            author_profile_pic: l.author_profile_pic,
            created_at: l.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub memories: Vec<MemoryResponse>,
    pub links: Vec<LinkResponse>,
    /// Filenames in the upload directory, as shown on the index page.
    pub images: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PostedResponse {
    pub id: String,
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// The global feed.
///
/// GET /
async fn get_feed(State(state): State<AppState>) -> Result<Json<FeedResponse>> {
    let (memories, links) = state.feed.list_feed().await?;
    let images = state.uploads.list().await?;

    Ok(Json(FeedResponse {
        memories: memories.into_iter().map(Into::into).collect(),
        links: links.into_iter().map(Into::into).collect(),
        images,
    }))
}

/// Share a memory.
///
/// POST /post_memory
async fn post_memory(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(req): Json<PostMemoryRequest>,
) -> Result<(StatusCode, Json<PostedResponse>)> {
    let memory = state.feed.post_memory(&user.user_id, &req.content).await?;

    Ok((
        StatusCode::CREATED,
        Json(PostedResponse {
            id: memory.id,
            message: "Memory shared".to_string(),
        }),
    ))
}

/// Share a link.
///
/// POST /post_link
async fn post_link(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(req): Json<PostLinkRequest>,
) -> Result<(StatusCode, Json<PostedResponse>)> {
    let link = state.feed.post_link(&user.user_id, &req.url).await?;

    Ok((
        StatusCode::CREATED,
        Json(PostedResponse {
            id: link.id,
            message: "Link shared".to_string(),
        }),
    ))
}
