#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use teamtodo_server::{
    app_state::{AppState, SharedState},
    authentication::auth,
    build_app,
    data_access::data_context::DataContext,
    settings::Settings,
    user::User,
};

/// The full router over a throwaway database.
pub struct TestApp {
    pub app: Router,
    pub state: SharedState,
    _dir: TempDir,
}

pub struct Account {
    pub id: Uuid,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("api.redb");
        let data_context = DataContext::open(path.to_str().unwrap()).expect("open store");
        let settings = Settings {
            jwt_secret: "integration-test-secret".into(),
            ..Settings::default()
        };
        let state = Arc::new(AppState::new(data_context, settings));

        Self {
            app: build_app(state.clone()),
            state,
            _dir: dir,
        }
    }

    /// Insert a user directly (skipping the slow password hash) and mint a
    /// token for it.
    pub fn account(&self, username: &str) -> Account {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{}@example.com", username.to_lowercase()),
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        self.state.data_context.insert_user(&user).expect("insert user");
        let token = auth::create_token(&user, &self.state.settings).expect("token");
        Account { id: user.id, token }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, account: &Account) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(&account.token), None).await
    }

    pub async fn post(&self, uri: &str, account: &Account, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(&account.token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, account: &Account, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(&account.token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, account: &Account) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(&account.token), None).await
    }
}
