#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use skintone_api::auth::jwt::{generate_access_token, JwtConfig};
use skintone_api::auth::JwtAuthorizer;
use skintone_api::config::ServerConfig;
use skintone_api::router::build_app_router;
use skintone_api::state::AppState;
use skintone_core::catalog::ShadeCatalog;
use skintone_core::store::{MemoryShadeStore, ShadeStore};

const TEST_SECRET: &str = "integration-test-secret-long-enough";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        store_timeout_secs: 0,
        max_body_bytes: 1024 * 1024,
        bulk_chunk_size: 500,
        database_url: None,
        log_json: false,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// The production router over the given store and configuration.
pub fn build_app_with_config(store: Arc<dyn ShadeStore>, config: ServerConfig) -> Router {
    let state = AppState {
        catalog: ShadeCatalog::with_chunk_size(store, config.bulk_chunk_size),
        authorizer: Arc::new(JwtAuthorizer::new(config.jwt.clone())),
    };
    build_app_router(state, &config)
}

/// The production router over the given store.
pub fn build_app_with_store(store: Arc<dyn ShadeStore>, chunk_size: usize) -> Router {
    build_app_with_config(
        store,
        ServerConfig {
            bulk_chunk_size: chunk_size,
            ..test_config()
        },
    )
}

/// The production router over a fresh in-memory store. The store handle is
/// returned so tests can inspect what was (or was not) written.
pub fn build_test_app() -> (Router, Arc<MemoryShadeStore>) {
    let store = Arc::new(MemoryShadeStore::new());
    let app = build_app_with_store(store.clone(), 500);
    (app, store)
}

/// A valid `Bearer` header value signed with the test secret.
pub fn bearer() -> String {
    let token = generate_access_token("integration-tests", &test_config().jwt)
        .expect("token generation should succeed");
    format!("Bearer {token}")
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

fn json_request(method: &str, uri: &str, body: &Value, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request("POST", uri, &body, None)).await
}

pub async fn post_json_authed(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request("POST", uri, &body, Some(&bearer()))).await
}

/// Authenticated POST with a raw body and an optional content type.
pub async fn post_raw_authed(
    app: Router,
    uri: &str,
    body: impl Into<Body>,
    content_type: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::post(uri).header("authorization", bearer());
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    send(app, builder.body(body.into()).unwrap()).await
}

pub async fn put_json_authed(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request("PUT", uri, &body, Some(&bearer()))).await
}

pub async fn delete_authed(app: Router, uri: &str) -> Response<Body> {
    let request = Request::delete(uri)
        .header("authorization", bearer())
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A complete, valid create payload.
pub fn shade_json(id: &str, skintone: &str) -> Value {
    serde_json::json!({
        "shade_id": id,
        "description": format!("{id} description"),
        "image_url": "",
        "skintone": skintone,
        "source": "",
        "recommended_brands": ["BrandA"]
    })
}
