//! Friendship flow integration tests
//!
//! Drives the friendship state machine through the HTTP surface with two
//! or three simulated browsers (one cookie-saving test server each).

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{build_app, register_and_login, server};

#[tokio::test]
async fn test_request_and_accept_flow() {
    let (app, _state, _uploads) = build_app().await;
    let ada = server(&app);
    let grace = server(&app);

    register_and_login(&ada, "ada").await;
    register_and_login(&grace, "grace").await;

    // Ada asks Grace
    let response = ada
        .post("/add_friend")
        .json(&json!({"username": "grace"}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let edge: Value = response.json();
    assert_eq!(edge["status"], "pending");
    let request_id = edge["id"].as_str().unwrap().to_string();

    // Both sides see the pending request
    let ada_view: Value = ada.get("/friends").await.json();
    assert_eq!(ada_view["sent_requests"][0]["username"], "grace");
    assert!(ada_view["friends"].as_array().unwrap().is_empty());

    let grace_view: Value = grace.get("/friends").await.json();
    assert_eq!(grace_view["received_requests"][0]["username"], "ada");
    assert_eq!(grace_view["received_requests"][0]["id"], request_id.as_str());

    // Grace accepts
    let response = grace.get(&format!("/accept_friend/{}", request_id)).await;
    response.assert_status_ok();
    let accepted: Value = response.json();
    assert_eq!(accepted["status"], "accepted");

    // Each lists the other as a friend, and nothing stays pending
    let ada_view: Value = ada.get("/friends").await.json();
    assert_eq!(ada_view["friends"][0]["username"], "grace");
    assert!(ada_view["sent_requests"].as_array().unwrap().is_empty());

    let grace_view: Value = grace.get("/friends").await.json();
    assert_eq!(grace_view["friends"][0]["username"], "ada");
    assert!(grace_view["received_requests"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_duplicate_request_either_direction() {
    let (app, _state, _uploads) = build_app().await;
    let ada = server(&app);
    let grace = server(&app);

    register_and_login(&ada, "ada").await;
    register_and_login(&grace, "grace").await;

    ada.post("/add_friend")
        .json(&json!({"username": "grace"}))
        .await
        .assert_status(StatusCode::CREATED);

    // Same direction
    let response = ada
        .post("/add_friend")
        .json(&json!({"username": "grace"}))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // Opposite direction: uniqueness is direction-agnostic
    let response = grace
        .post("/add_friend")
        .json(&json!({"username": "ada"}))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "ALREADY_EXISTS");
}

#[tokio::test]
async fn test_accepted_friendship_blocks_new_requests() {
    let (app, _state, _uploads) = build_app().await;
    let ada = server(&app);
    let grace = server(&app);

    register_and_login(&ada, "ada").await;
    register_and_login(&grace, "grace").await;

    let edge: Value = ada
        .post("/add_friend")
        .json(&json!({"username": "grace"}))
        .await
        .json();
    grace
        .get(&format!("/accept_friend/{}", edge["id"].as_str().unwrap()))
        .await
        .assert_status_ok();

    // Already friends: a fresh request still conflicts
    let response = ada
        .post("/add_friend")
        .json(&json!({"username": "grace"}))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_self_friend_request() {
    let (app, _state, _uploads) = build_app().await;
    let ada = server(&app);

    register_and_login(&ada, "ada").await;

    let response = ada
        .post("/add_friend")
        .json(&json!({"username": "ada"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "SELF_FRIEND_REQUEST");
}

#[tokio::test]
async fn test_request_unknown_user() {
    let (app, _state, _uploads) = build_app().await;
    let ada = server(&app);

    register_and_login(&ada, "ada").await;

    let response = ada
        .post("/add_friend")
        .json(&json!({"username": "nobody"}))
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_only_receiver_may_accept() {
    let (app, _state, _uploads) = build_app().await;
    let ada = server(&app);
    let grace = server(&app);
    let joan = server(&app);

    register_and_login(&ada, "ada").await;
    register_and_login(&grace, "grace").await;
    register_and_login(&joan, "joan").await;

    let edge: Value = ada
        .post("/add_friend")
        .json(&json!({"username": "grace"}))
        .await
        .json();
    let request_id = edge["id"].as_str().unwrap().to_string();

    // A third party cannot accept
    let response = joan.get(&format!("/accept_friend/{}", request_id)).await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Neither can the sender
    let response = ada.get(&format!("/accept_friend/{}", request_id)).await;
    response.assert_status(StatusCode::FORBIDDEN);

    // The request is still pending for the receiver
    let grace_view: Value = grace.get("/friends").await.json();
    assert_eq!(grace_view["received_requests"][0]["id"], request_id.as_str());
    assert!(grace_view["friends"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_accept_unknown_request() {
    let (app, _state, _uploads) = build_app().await;
    let ada = server(&app);

    register_and_login(&ada, "ada").await;

    let response = ada.get("/accept_friend/no-such-id").await;
    response.assert_status_not_found();
}
