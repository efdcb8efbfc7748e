//! Friendship Routes
//!
//! Friend requests and the friends list.
//!
//! Routes:
//! - POST /add_friend - Send a friend request by username
//! - GET /friends - Pending requests (both directions) and accepted friends
//! - GET /accept_friend/:request_id - Accept a received request

use axum::http::StatusCode;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::SessionUser;
use crate::models::{Friendship, PendingRequest, User};
use crate::{AppState, Result};

/// Build friendship routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/add_friend", post(add_friend))
        .route("/friends", get(list_friends))
        .route("/accept_friend/:request_id", get(accept_friend))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AddFriendRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct FriendshipResponse {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Friendship> for FriendshipResponse {
    fn from(f: Friendship) -> Self {
        FriendshipResponse {
            id: f.id,
            sender_id: f.sender_id,
            receiver_id: f.receiver_id,
            status: f.status,
            created_at: f.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PendingRequestResponse {
    /// The id to pass to /accept_friend.
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<PendingRequest> for PendingRequestResponse {
    fn from(r: PendingRequest) -> Self {
        PendingRequestResponse {
            id: r.id,
            user_id: r.user_id,
            username: r.username,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FriendResponse {
    pub id: String,
    pub username: String,
    pub profile_pic: String,
}

impl From<User> for FriendResponse {
    fn from(u: User) -> Self {
        FriendResponse {
            id: u.id,
            username: u.username,
            profile_pic: u.profile_pic,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FriendsResponse {
    pub sent_requests: Vec<PendingRequestResponse>,
    pub received_requests: Vec<PendingRequestResponse>,
    pub friends: Vec<FriendResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Send a friend request.
///
/// POST /add_friend
async fn add_friend(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(req): Json<AddFriendRequest>,
) -> Result<(StatusCode, Json<FriendshipResponse>)> {
    let edge = state
        .friendships
        .request(&user.user_id, &req.username)
        .await?;

    Ok((StatusCode::CREATED, Json(edge.into())))
}

/// Pending requests in both directions plus accepted friends.
///
/// GET /friends
async fn list_friends(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<FriendsResponse>> {
    let (sent, received) = state.friendships.pending(&user.user_id).await?;
    let friends = state.friendships.friends(&user.user_id).await?;

    Ok(Json(FriendsResponse {
        sent_requests: sent.into_iter().map(Into::into).collect(),
        received_requests: received.into_iter().map(Into::into).collect(),
        friends: friends.into_iter().map(Into::into).collect(),
    }))
}

/// Accept a received friend request.
///
/// GET /accept_friend/:request_id
async fn accept_friend(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(request_id): Path<String>,
) -> Result<Json<FriendshipResponse>> {
    let edge = state
        .friendships
        .accept(&request_id, &user.user_id)
        .await?;

    Ok(Json(edge.into()))
}
