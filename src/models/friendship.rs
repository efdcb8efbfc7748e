//! Friendship edge model.
//!
//! A friendship is a directed request edge (sender asked receiver) with a
//! status flag. The undirected "friends" relation is derived from accepted
//! edges in either direction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Friendship edge status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    #[default]
    Pending,
    Accepted,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "accepted" => Self::Accepted,
            _ => Self::Pending,
        }
    }
}

/// A friendship edge as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Friendship {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    pub fn status_enum(&self) -> FriendshipStatus {
        FriendshipStatus::from_str(&self.status)
    }

    pub fn is_accepted(&self) -> bool {
        self.status == "accepted"
    }

    /// The user on the other end of the edge, from `user_id`'s perspective.
    pub fn other_user_id(&self, user_id: &str) -> &str {
        if self.sender_id == user_id {
            &self.receiver_id
        } else {
            &self.sender_id
        }
    }
}

/// A pending request joined with the counterparty's username for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PendingRequest {
    /// Friendship edge id (what `accept` takes).
    pub id: String,
    /// The other user's id.
    pub user_id: String,
    /// The other user's username.
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(FriendshipStatus::from_str("pending"), FriendshipStatus::Pending);
        assert_eq!(FriendshipStatus::from_str("accepted"), FriendshipStatus::Accepted);
        assert_eq!(FriendshipStatus::Accepted.as_str(), "accepted");
        // Unknown statuses collapse to pending
        assert_eq!(FriendshipStatus::from_str("blocked"), FriendshipStatus::Pending);
    }

    #[test]
    fn test_other_user_id() {
        let edge = Friendship {
            id: "f1".to_string(),
            sender_id: "alice".to_string(),
            receiver_id: "bob".to_string(),
            status: "pending".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(edge.other_user_id("alice"), "bob");
        assert_eq!(edge.other_user_id("bob"), "alice");
    }
}
