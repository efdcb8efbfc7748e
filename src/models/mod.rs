//! Data models for Keepsake.
//!
//! Defines the core types used throughout the system: users, sessions,
//! friendship edges, and feed content.

mod feed;
mod friendship;
mod user;

pub use feed::*;
pub use friendship::*;
pub use user::*;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new UUID
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
