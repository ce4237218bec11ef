mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn register_login_and_me() {
    let t = TestApp::new();

    let (status, body) = t
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "username": "dana", "email": "Dana@Example.com", "password": "s3cretpw" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "dana@example.com");
    assert!(body["token"].is_string());

    let (status, body) = t
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "dana@example.com", "password": "s3cretpw" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = t.send(Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "dana");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let t = TestApp::new();
    t.send(
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": "erin", "email": "erin@example.com", "password": "rightpass" })),
    )
    .await;

    let (status, body) = t
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "erin", "password": "wrongpass" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let t = TestApp::new();
    t.account("frank");

    let (status, body) = t
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "username": "Frank", "email": "other@example.com", "password": "whatever1" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username is already taken");
}

#[tokio::test]
async fn token_for_deleted_subject_is_unauthorized() {
    let t = TestApp::new();
    let ghost = teamtodo_server::user::User {
        id: uuid::Uuid::new_v4(),
        username: "ghost".into(),
        email: "ghost@example.com".into(),
        password_hash: String::new(),
        created_at: chrono::Utc::now(),
    };
    // Never stored
    let token = teamtodo_server::authentication::auth::create_token(&ghost, &t.state.settings).unwrap();

    let (status, body) = t.send(Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let t = TestApp::new();
    t.account("grace");

    let (status, body) = t
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "username": "gracie", "email": "GRACE@example.com", "password": "whatever1" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email is already registered");
}
