//! Keepsake - Shared Memories Journal
//!
//! A small multi-user journal server: accounts, friendships, and a shared
//! feed of memories, links, and images.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use config::config;
pub use error::{Error, Result};
pub use state::AppState;
