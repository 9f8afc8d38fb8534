mod common;

use axum::http::StatusCode;
use common::{
    authed_json_request, authed_request, body_json, empty_request, insert_item, insert_store,
    json_request, register_and_login, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test]
async fn test_item_reads_are_public(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let store_id = insert_store(&pool, "Acme").await;
    let item_id = insert_item(&pool, "hammer", 9.99, store_id).await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/item"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = app
        .oneshot(empty_request("GET", &format!("/item/{}", item_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "hammer");
    assert_eq!(body["price"], 9.99);
}

#[sqlx::test]
async fn test_create_item_requires_a_token(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/item",
            json!({"name": "hammer", "price": 9.99, "store_id": 0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "authorization_required");
}

#[sqlx::test]
async fn test_create_item_requires_admin(pool: PgPool) {
    let app = setup_test_app(pool).await;

    // First user (id 1) is the admin; the second is not.
    register_and_login(&app, "admin", "password123").await;
    let (standard_token, _) = register_and_login(&app, "bob", "password123").await;

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/item",
            &standard_token,
            json!({"name": "hammer", "price": 9.99, "store_id": 0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "admin_required");
}

#[sqlx::test]
async fn test_admin_creates_an_item(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (admin_token, _) = register_and_login(&app, "admin", "password123").await;
    let store_id = insert_store(&pool, "Acme").await;

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/item",
            &admin_token,
            json!({"name": "hammer", "price": 9.99, "store_id": store_id}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "hammer");
    assert_eq!(body["store_id"], store_id);
}

#[sqlx::test]
async fn test_create_item_with_unknown_store(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let (admin_token, _) = register_and_login(&app, "admin", "password123").await;

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/item",
            &admin_token,
            json!({"name": "hammer", "price": 9.99, "store_id": 99999}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn test_update_item_requires_a_fresh_token(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (_, refresh_token) = register_and_login(&app, "admin", "password123").await;
    let store_id = insert_store(&pool, "Acme").await;
    let item_id = insert_item(&pool, "hammer", 9.99, store_id).await;

    // Exchange the refresh token for a non-fresh access token.
    let response = app
        .clone()
        .oneshot(authed_request("POST", "/refresh", &refresh_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stale_token = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/item/{}", item_id),
            &stale_token,
            json!({"name": "sledgehammer", "price": 30.0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "fresh_token_required");
}

#[sqlx::test]
async fn test_update_item_replaces_fields(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (admin_token, _) = register_and_login(&app, "admin", "password123").await;
    let store_id = insert_store(&pool, "Acme").await;
    let item_id = insert_item(&pool, "hammer", 9.99, store_id).await;

    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/item/{}", item_id),
            &admin_token,
            json!({"name": "sledgehammer", "price": 30.0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "sledgehammer");
    assert_eq!(body["price"], 30.0);
    assert_eq!(body["store_id"], store_id);
}

#[sqlx::test]
async fn test_update_item_upserts_when_absent(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let (admin_token, _) = register_and_login(&app, "admin", "password123").await;

    let response = app
        .oneshot(authed_json_request(
            "PUT",
            "/item/777",
            &admin_token,
            json!({"name": "anvil", "price": 99.0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], 777);
    // Items created through the upsert land in the Unassigned store.
    assert_eq!(body["store_id"], 0);
}

#[sqlx::test]
async fn test_delete_item_admin_fresh_flow(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (admin_token, _) = register_and_login(&app, "admin", "password123").await;
    let store_id = insert_store(&pool, "Acme").await;
    let item_id = insert_item(&pool, "hammer", 9.99, store_id).await;

    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &format!("/item/{}", item_id),
            &admin_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Item deleted");

    let response = app
        .oneshot(authed_request(
            "DELETE",
            &format!("/item/{}", item_id),
            &admin_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn test_create_item_rejects_negative_price(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let (admin_token, _) = register_and_login(&app, "admin", "password123").await;

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/item",
            &admin_token,
            json!({"name": "hammer", "price": -1.0, "store_id": 0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
}
