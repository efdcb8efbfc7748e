//! Configuration management for Keepsake.
//!
//! Loads configuration from environment variables (with .env support) into
//! an immutable process-global, constructed once at startup.

use std::env;
use std::sync::OnceLock;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub max_age_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory uploaded images are written to.
    pub dir: String,
    /// Lowercase extensions accepted for image uploads.
    pub allowed_extensions: Vec<String>,
    /// Maximum upload size in bytes.
    pub max_file_size: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_or("PORT", "8080").parse().expect("Invalid PORT"),
            },
            database: DatabaseConfig {
                path: env_or("DATABASE_PATH", "./data/keepsake.db"),
            },
            session: SessionConfig {
                max_age_seconds: env_or("SESSION_MAX_AGE", "604800")
                    .parse()
                    .expect("Invalid SESSION_MAX_AGE"),
            },
            uploads: UploadConfig {
                dir: env_or("UPLOAD_DIR", "./data/uploads"),
                allowed_extensions: env_or("UPLOAD_EXTENSIONS", "png,jpg,jpeg,gif")
                    .split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect(),
                max_file_size: env_or("UPLOAD_MAX_BYTES", "5242880")
                    .parse()
                    .expect("Invalid UPLOAD_MAX_BYTES"),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
