//! Friendship service.
//!
//! Friendship is modeled as directed request edges with a status flag
//! rather than a separate undirected entity: the edge records who asked
//! whom, and the "friends" relation is derived from accepted edges in
//! either direction. At most one edge exists per pair of users.

use tracing::info;

use crate::db::{self, DbPool};
use crate::models::{Friendship, PendingRequest, User};
use crate::{Error, Result};

#[derive(Clone)]
pub struct FriendshipService {
    db: DbPool,
}

impl FriendshipService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Send a friend request to a user by username.
    ///
    /// Fails when the username is unknown, resolves to the sender, or an
    /// edge already exists between the pair in either direction and any
    /// status (an accepted friendship also blocks re-requesting).
    pub async fn request(&self, sender_id: &str, receiver_username: &str) -> Result<Friendship> {
        let receiver = db::get_user_by_username(&self.db, receiver_username)
            .await?
            .ok_or_else(|| Error::NotFound(format!("No user named {}", receiver_username)))?;

        if receiver.id == sender_id {
            return Err(Error::SelfFriendRequest);
        }

        if db::find_friendship_between(&self.db, sender_id, &receiver.id)
            .await?
            .is_some()
        {
            return Err(Error::AlreadyExists(format!(
                "you are already friends with {} or a request is pending",
                receiver.username
            )));
        }

        // The unordered-pair unique index turns a concurrent duplicate into
        // the same AlreadyExists outcome as the check above.
        let edge = db::create_friendship(&self.db, sender_id, &receiver.id).await?;
        info!(sender_id = %sender_id, to = %receiver.username, "friend request sent");
        Ok(edge)
    }

    /// Accept a received friend request.
    ///
    /// Only the receiver may accept; anyone else gets `Forbidden` and the
    /// edge stays pending.
    pub async fn accept(&self, request_id: &str, acting_user_id: &str) -> Result<Friendship> {
        let edge = db::get_friendship(&self.db, request_id).await?;

        if edge.receiver_id != acting_user_id {
            return Err(Error::Forbidden);
        }

        let accepted = db::accept_friendship(&self.db, request_id).await?;
        info!(request_id = %request_id, "friend request accepted");
        Ok(accepted)
    }

    /// Pending requests involving the user: (sent, received).
    pub async fn pending(
        &self,
        user_id: &str,
    ) -> Result<(Vec<PendingRequest>, Vec<PendingRequest>)> {
        let sent = db::list_sent_pending(&self.db, user_id).await?;
        let received = db::list_received_pending(&self.db, user_id).await?;
        Ok((sent, received))
    }

    /// The user's friends: counterparties of accepted edges.
    pub async fn friends(&self, user_id: &str) -> Result<Vec<User>> {
        db::list_friends(&self.db, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_user, init_pool, initialize_schema, CreateUser};

    async fn setup() -> (FriendshipService, User, User, User) {
        let pool = init_pool(":memory:").await.unwrap();
        initialize_schema(&pool).await.unwrap();

        let ada = user(&pool, "ada").await;
        let grace = user(&pool, "grace").await;
        let joan = user(&pool, "joan").await;

        (FriendshipService::new(pool), ada, grace, joan)
    }

    async fn user(pool: &DbPool, username: &str) -> User {
        create_user(
            pool,
            CreateUser {
                username: username.to_string(),
                password_hash: "$argon2id$test".to_string(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_request_unknown_user() {
        let (svc, ada, _, _) = setup().await;
        let err = svc.request(&ada.id, "nobody").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_request_self() {
        let (svc, ada, _, _) = setup().await;
        let err = svc.request(&ada.id, "ada").await.unwrap_err();
        assert!(matches!(err, Error::SelfFriendRequest));
    }

    #[tokio::test]
    async fn test_request_duplicate_is_direction_agnostic() {
        let (svc, ada, grace, _) = setup().await;

        svc.request(&ada.id, "grace").await.unwrap();

        // Re-request in the same direction
        let same = svc.request(&ada.id, "grace").await.unwrap_err();
        assert!(matches!(same, Error::AlreadyExists(_)));

        // And in the opposite direction
        let reverse = svc.request(&grace.id, "ada").await.unwrap_err();
        assert!(matches!(reverse, Error::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_accepted_friendship_still_blocks_requests() {
        let (svc, ada, grace, _) = setup().await;

        let edge = svc.request(&ada.id, "grace").await.unwrap();
        svc.accept(&edge.id, &grace.id).await.unwrap();

        let err = svc.request(&grace.id, "ada").await.unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_accept_by_receiver() {
        let (svc, ada, grace, _) = setup().await;

        let edge = svc.request(&ada.id, "grace").await.unwrap();
        assert_eq!(edge.status, "pending");

        let accepted = svc.accept(&edge.id, &grace.id).await.unwrap();
        assert!(accepted.is_accepted());

        let ada_friends = svc.friends(&ada.id).await.unwrap();
        let grace_friends = svc.friends(&grace.id).await.unwrap();
        assert_eq!(ada_friends[0].username, "grace");
        assert_eq!(grace_friends[0].username, "ada");
    }

    #[tokio::test]
    async fn test_accept_by_third_party_is_forbidden() {
        let (svc, ada, _grace, joan) = setup().await;

        let edge = svc.request(&ada.id, "grace").await.unwrap();

        let err = svc.accept(&edge.id, &joan.id).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden));

        // The edge is untouched
        let (sent, _) = svc.pending(&ada.id).await.unwrap();
        assert_eq!(sent.len(), 1);
    }

    #[tokio::test]
    async fn test_sender_cannot_accept_own_request() {
        let (svc, ada, _, _) = setup().await;

        let edge = svc.request(&ada.id, "grace").await.unwrap();
        let err = svc.accept(&edge.id, &ada.id).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden));
    }

    #[tokio::test]
    async fn test_pending_lists_both_sides() {
        let (svc, ada, grace, joan) = setup().await;

        svc.request(&ada.id, "grace").await.unwrap();
        svc.request(&joan.id, "ada").await.unwrap();

        let (sent, received) = svc.pending(&ada.id).await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].username, "grace");
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].username, "joan");
    }
}
