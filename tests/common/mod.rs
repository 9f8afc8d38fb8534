use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use sqlx::PgPool;
use std::sync::Arc;

use storehouse::config::jwt::JwtConfig;
use storehouse::db::{InitGuard, create_schema};
use storehouse::router::init_router;
use storehouse::state::AppState;
use storehouse::utils::blocklist::TokenBlocklist;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604_800,
    }
}

pub async fn test_state(pool: PgPool) -> AppState {
    create_schema(&pool).await.unwrap();

    AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        blocklist: TokenBlocklist::default(),
        schema_init: Arc::new(InitGuard::default()),
    }
}

pub async fn setup_test_app(pool: PgPool) -> Router {
    let state = test_state(pool).await;
    init_router(state, None)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn authed_json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers a user and logs in, returning `(access_token, refresh_token)`.
/// The first user registered against a fresh database gets id 1 and with it
/// the admin role.
#[allow(dead_code)]
pub async fn register_and_login(app: &Router, username: &str, password: &str) -> (String, String) {
    use tower::ServiceExt;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/user/register",
            serde_json::json!({"username": username, "password": password}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/user/login",
            serde_json::json!({"username": username, "password": password}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let body = body_json(response).await;
    (
        body["access_token"].as_str().unwrap().to_string(),
        body["refresh_token"].as_str().unwrap().to_string(),
    )
}

/// Inserts an item directly, bypassing the admin-gated HTTP surface.
#[allow(dead_code)]
pub async fn insert_item(pool: &PgPool, name: &str, price: f64, store_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO items (name, price, store_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(price)
    .bind(store_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a store directly.
#[allow(dead_code)]
pub async fn insert_store(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO stores (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}
