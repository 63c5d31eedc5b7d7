#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use dran_backend::config::cookie::CookieConfig;
use dran_backend::config::cors::CorsConfig;
use dran_backend::config::jwt::JwtConfig;
use dran_backend::modules::auth::model::{User, UserRole};
use dran_backend::router::init_router;
use dran_backend::state::AppState;
use dran_backend::store::{MemoryStore, to_fields};
use dran_backend::utils::jwt::create_token;
use dran_backend::utils::password::hash_password;

pub fn test_state() -> AppState {
    AppState {
        store: Arc::new(MemoryStore::new()),
        jwt_config: JwtConfig {
            secret: "test-secret".to_string(),
            expires_in: 3600,
        },
        cookie_config: CookieConfig {
            expires_days: 7,
            secure: false,
            same_site: "Lax".to_string(),
            domain: None,
        },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        idp_config: None,
    }
}

pub fn test_app() -> (Router, AppState) {
    let state = test_state();
    (init_router(state.clone()), state)
}

/// Seed a user record directly into the store and return a valid
/// session token for it.
pub async fn seed_user(state: &AppState, email: &str, password: &str, role: UserRole) -> String {
    let now = Utc::now();
    let user = User {
        name: "Test User".to_string(),
        phone: "08012345678".to_string(),
        email: email.to_string(),
        password: hash_password(password).unwrap(),
        role,
        is_active: true,
        created_at: now,
        updated_at: now,
        created_by: None,
        updated_by: None,
    };
    state
        .store
        .set("users", email, to_fields(&user).unwrap())
        .await
        .unwrap();

    create_token(email, role, &state.jwt_config).unwrap()
}

pub async fn disable_user(state: &AppState, email: &str) {
    let mut patch = serde_json::Map::new();
    patch.insert("isActive".to_string(), json!(false));
    state.store.update("users", email, patch).await.unwrap();
}

pub fn json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    match body {
        Some(body) => builder
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn authed_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"));
    match body {
        Some(body) => builder
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    // Rejections from axum's own extractors carry plain-text bodies.
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Like [`send`] but keeps the response so headers can be inspected.
pub async fn send_raw(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}
