//! Shared harness for API integration tests.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use soundope_api::auth::jwt::{generate_access_token, JwtConfig};
use soundope_api::config::{LedgerConfig, ServerConfig};
use soundope_api::router::build_app_router;
use soundope_api::state::AppState;
use soundope_db::models::track::{CreateTrack, Track};
use soundope_db::models::user::{CreateUser, User};
use soundope_db::repositories::{TrackRepo, UserRepo};
use sqlx::PgPool;
use tower::ServiceExt;

const TEST_JWT_SECRET: &str = "integration-test-secret-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults and the default ledger policies.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        ledger: LedgerConfig::default(),
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, LedgerConfig::default())
}

/// Like [`build_test_app`] but with custom ledger policies.
pub fn build_test_app_with(pool: PgPool, ledger: LedgerConfig) -> Router {
    let mut config = test_config();
    config.ledger = ledger;

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a bearer token the test app will accept.
pub fn token_for(user_id: i64, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            role: Some(role.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

pub async fn create_user_with_credits(
    pool: &PgPool,
    username: &str,
    standard: i64,
    premium: i64,
) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            role: Some("artist".to_string()),
            standard_credits: Some(standard),
            premium_credits: Some(premium),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

pub async fn create_track(pool: &PgPool, artist_id: i64, title: &str) -> Track {
    TrackRepo::create(
        pool,
        artist_id,
        &CreateTrack {
            title: title.to_string(),
            genre: Some("indie".to_string()),
            mood: Some("warm".to_string()),
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

/// POST without a body.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
