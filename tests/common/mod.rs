//! Shared test helpers.
//!
//! Builds a full application router over an in-memory SQLite database and
//! a temporary upload directory.

use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use tempfile::TempDir;

use keepsake::config::{SessionConfig, UploadConfig};
use keepsake::db;
use keepsake::services::UploadService;
use keepsake::{api, AppState};

/// Build the application router with test state.
///
/// The returned `TempDir` owns the upload directory; keep it alive for the
/// duration of the test.
pub async fn build_app() -> (Router, AppState, TempDir) {
    let pool = db::init_pool(":memory:")
        .await
        .expect("Failed to create test database");
    db::initialize_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    let upload_dir = TempDir::new().expect("Failed to create upload dir");
    let uploads = UploadService::new(&UploadConfig {
        dir: upload_dir.path().to_string_lossy().into_owned(),
        allowed_extensions: vec![
            "png".to_string(),
            "jpg".to_string(),
            "jpeg".to_string(),
            "gif".to_string(),
        ],
        max_file_size: 1024 * 1024,
    });
    uploads.ensure_dir().await.expect("Failed to create dir");

    let state = AppState::from_parts(
        pool,
        SessionConfig {
            max_age_seconds: 3600,
        },
        uploads,
    );

    let app = Router::new()
        .merge(api::routes(state.clone()))
        .with_state(state.clone());

    (app, state, upload_dir)
}

/// A cookie-saving test server (one per simulated browser).
pub fn server(app: &Router) -> TestServer {
    let mut server = TestServer::new(app.clone()).expect("Failed to create test server");
    server.do_save_cookies();
    server
}

/// Register an account and log in, leaving the session cookie on `server`.
pub async fn register_and_login(server: &TestServer, username: &str) {
    let response = server
        .post("/register")
        .json(&json!({
            "username": username,
            "password": "hunter2",
            "confirm_password": "hunter2",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/login")
        .json(&json!({
            "username": username,
            "password": "hunter2",
        }))
        .await;
    response.assert_status_ok();
}
