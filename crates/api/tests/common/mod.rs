#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use wellness_api::auth::jwt::{generate_access_token, JwtConfig};
use wellness_api::config::ServerConfig;
use wellness_api::router::build_app_router;
use wellness_api::state::AppState;
use wellness_core::session::memory::MemorySessionStore;
use wellness_core::session::service::SessionService;
use wellness_core::session::transition::TransitionPolicy;
use wellness_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        allow_unpublish: true,
        database_url: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// A router over a fresh in-memory store, plus handles for assertions.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    pub store: Arc<MemorySessionStore>,
}

impl TestApp {
    /// Mint a valid Bearer token for `user`.
    pub fn token(&self, user: DbId) -> String {
        generate_access_token(user, &self.config.jwt).unwrap()
    }

    /// Fresh clone of the router for one `oneshot` request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config())
}

/// Like [`build_test_app`] but with a caller-tweaked configuration.
pub fn build_test_app_with(config: ServerConfig) -> TestApp {
    let store = Arc::new(MemorySessionStore::new());
    let policy = TransitionPolicy {
        allow_unpublish: config.allow_unpublish,
    };
    let state = AppState {
        sessions: SessionService::new(store.clone(), policy),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        config,
        store,
    }
}

/// Send an unauthenticated GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an unauthenticated POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a raw (possibly malformed) body and a Bearer token.
pub async fn post_raw_auth(app: Router, uri: &str, body: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
