//! Business logic services for Keepsake.
//!
//! Services own the rules; the db modules own the SQL. Handlers call
//! services with the authenticated user and validated input.

mod auth;
pub mod embed;
mod feed;
mod friendship;
mod upload;

pub use auth::AuthService;
pub use feed::FeedService;
pub use friendship::FriendshipService;
pub use upload::UploadService;
