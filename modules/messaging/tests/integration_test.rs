//! Integration tests for the messaging REST surface.
//!
//! These drive the real router with in-process requests and assert the wire
//! contract: status codes, envelope shapes, and the exact error strings.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use messaging::api::rest::routes;
use messaging::domain::service::Service;
use messaging::infra::storage::memory::InMemoryStore;

fn test_router() -> Router {
    let store = Arc::new(InMemoryStore::new());
    routes::router(Arc::new(Service::new(store)))
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(router: &Router, username: &str, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        router,
        Method::POST,
        "/api/v1/auth/register",
        Some(json!({ "username": username, "email": email, "password": password })),
    )
    .await
}

#[tokio::test]
async fn register_returns_created_with_public_user() {
    let router = test_router();

    let (status, body) = register(&router, "alice", "alice@example.com", "secret").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"]["id"].is_string());
    // Credentials never leave the store
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn register_same_email_twice_conflicts() {
    let router = test_router();

    let (first, _) = register(&router, "alice", "dup@example.com", "secret").await;
    assert_eq!(first, StatusCode::CREATED);

    let (second, body) = register(&router, "alice2", "dup@example.com", "other").await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn register_missing_password_adds_nothing() {
    let router = test_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/auth/register",
        Some(json!({ "username": "alice", "email": "alice@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    let (status, body) = send(&router, Method::GET, "/api/v1/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn register_empty_field_counts_as_missing() {
    let router = test_router();

    let (status, body) = register(&router, "alice", "alice@example.com", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn login_happy_path_returns_fake_token() {
    let router = test_router();
    register(&router, "alice", "alice@example.com", "secret").await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({ "email": "alice@example.com", "password": "secret" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], "alice@example.com");

    let token = body["token"].as_str().unwrap();
    let user_id = body["user"]["id"].as_str().unwrap();
    assert_eq!(token, format!("fake-jwt-token-{user_id}"));
}

#[tokio::test]
async fn login_wrong_password_is_unauthorized() {
    let router = test_router();
    register(&router, "alice", "alice@example.com", "secret").await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({ "email": "alice@example.com", "password": "wrong" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn login_unknown_email_is_unauthorized() {
    let router = test_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({ "email": "ghost@example.com", "password": "secret" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn login_missing_fields_is_bad_request() {
    let router = test_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({ "email": "alice@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing email or password");
}

#[tokio::test]
async fn message_ids_increase_from_one() {
    let router = test_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/messages",
        Some(json!({ "senderId": "A", "receiverId": "B", "content": "first" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"]["id"], 1);
    assert_eq!(body["message"]["senderId"], "A");
    assert_eq!(body["message"]["receiverId"], "B");
    assert!(body["message"]["timestamp"].as_str().unwrap().ends_with('Z'));

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/messages",
        Some(json!({ "senderId": "A", "receiverId": "B", "content": "second" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"]["id"], 2);
}

#[tokio::test]
async fn message_without_receiver_omits_the_key() {
    let router = test_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/messages",
        Some(json!({ "senderId": "A", "content": "broadcast" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["message"].get("receiverId").is_none());
}

#[tokio::test]
async fn message_missing_sender_or_content_is_bad_request() {
    let router = test_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/messages",
        Some(json!({ "receiverId": "B", "content": "no sender" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/v1/messages",
        Some(json!({ "senderId": "A", "receiverId": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn messages_for_user_cover_both_directions() {
    let router = test_router();

    send(
        &router,
        Method::POST,
        "/api/v1/messages",
        Some(json!({ "senderId": "A", "receiverId": "B", "content": "to B" })),
    )
    .await;
    send(
        &router,
        Method::POST,
        "/api/v1/messages",
        Some(json!({ "senderId": "B", "receiverId": "C", "content": "from B" })),
    )
    .await;

    let (status, body) = send(&router, Method::GET, "/api/v1/messages?userId=B", None).await;
    assert_eq!(status, StatusCode::OK);

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    // Insertion order is preserved
    assert_eq!(messages[0]["id"], 1);
    assert_eq!(messages[1]["id"], 2);
}

#[tokio::test]
async fn messages_missing_user_id_is_bad_request() {
    let router = test_router();

    let (status, body) = send(&router, Method::GET, "/api/v1/messages", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing userId parameter");
}

#[tokio::test]
async fn users_list_reflects_registrations() {
    let router = test_router();

    register(&router, "alice", "alice@example.com", "a").await;
    register(&router, "bob", "bob@example.com", "b").await;

    let (status, body) = send(&router, Method::GET, "/api/v1/users", None).await;
    assert_eq!(status, StatusCode::OK);

    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);

    let mut emails: Vec<&str> = users
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    emails.sort_unstable();
    assert_eq!(emails, vec!["alice@example.com", "bob@example.com"]);
}
