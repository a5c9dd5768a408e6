//! HTTP round-trip tests through the axum router.
//!
//! The router runs over real services and an in-memory SQLite database;
//! only the advice provider is stubbed.

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{setup_persistence, StubAdviceClient, TEST_SECRET};
use tbank_api::api::{create_router, AppState};
use tbank_api::config::Config;
use tbank_api::services::{Services, TokenService};

async fn app_with(advice: StubAdviceClient) -> Router {
    let config = Config::from_lookup(|name| match name {
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "REQUEST_TIMEOUT_SECS" => Some("30".to_string()),
        _ => None,
    })
    .expect("test config");

    let (db, uow) = setup_persistence().await;
    let services = Services::new(uow, TokenService::from_config(&config), Arc::new(advice));
    create_router(AppState::new(Arc::new(services), db), &config)
}

async fn app() -> Router {
    app_with(StubAdviceClient::answering("Cook at home more often.")).await
}

async fn send(
    app: &Router,
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
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Register and log in, returning the bearer token
async fn login(app: &Router, username: &str) -> String {
    let credentials = json!({ "username": username, "password": "pw1" });
    let (status, _) = send(app, Method::POST, "/api/register", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, Method::POST, "/api/login", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_and_openapi_are_public() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"]["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/income"].is_object());
}

#[tokio::test]
async fn test_swagger_ui_is_served() {
    let app = app().await;
    let request = Request::builder()
        .uri("/swagger/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8_lossy(&bytes);
    assert!(page.contains("swagger-ui"));
}

#[tokio::test]
async fn test_register_and_login_responses() {
    let app = app().await;
    let credentials = json!({ "username": "alice", "password": "pw1" });

    let (status, body) = send(&app, Method::POST, "/api/register", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered");
    let uid = body["uid"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::POST, "/api/register", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_USERNAME");

    let (status, body) = send(&app, Method::POST, "/api/login", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["uid"], uid.as_str());
    assert_eq!(body["expires_in"], 12 * 3600);

    let wrong = json!({ "username": "alice", "password": "nope" });
    let (status, body) = send(&app, Method::POST, "/api/login", None, Some(wrong)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_register_requires_both_fields() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({ "username": "", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({ "username": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_bearer_token() {
    let app = app().await;

    for (method, uri) in [
        (Method::GET, "/api/users"),
        (Method::GET, "/api/income?from=2024-01-01&to=2024-01-31"),
        (Method::POST, "/api/expense"),
        (Method::DELETE, "/api/expense/1"),
        (Method::GET, "/api/ai-advice"),
    ] {
        let (status, body) = send(&app, method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
    }

    let (status, _) = send(&app, Method::GET, "/api/users", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_income_lifecycle_updates_profile() {
    let app = app().await;
    let token = login(&app, "alice").await;

    let entry = json!({ "category": "salary", "amount": 1000.0, "date": "2024-01-01" });
    let (status, body) = send(&app, Method::POST, "/api/income", Some(&token), Some(entry)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["incomes_balance"], 1000.0);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/income?from=2024-01-01&to=2024-01-31",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], id);
    assert_eq!(entries[0]["date"], "2024-01-01");
    assert!(entries[0].get("user_id").is_none());

    let uri = format!("/api/income/{id}");
    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Income deleted");

    let (_, body) = send(&app, Method::GET, "/api/users", Some(&token), None).await;
    assert_eq!(body["incomes_balance"], 0.0);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_entries_are_rejected() {
    let app = app().await;
    let token = login(&app, "bob").await;

    for entry in [
        json!({ "category": "food", "amount": 0.0, "date": "2024-01-01" }),
        json!({ "category": "", "amount": 5.0, "date": "2024-01-01" }),
        json!({ "category": "food", "amount": 5.0, "date": "01/02/2024" }),
        json!({ "category": "food", "amount": 1e308, "date": "2024-01-01" }),
        json!({ "category": "food", "amount": 0.005, "date": "2024-01-01" }),
    ] {
        let (status, body) = send(&app, Method::POST, "/api/expense", Some(&token), Some(entry)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/expense?from=2024-01-01&to=later",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_foreign_delete_is_forbidden() {
    let app = app().await;
    let alice = login(&app, "alice").await;
    let mallory = login(&app, "mallory").await;

    let entry = json!({ "category": "rent", "amount": 600.0, "date": "2024-02-01" });
    let (_, body) = send(&app, Method::POST, "/api/expense", Some(&alice), Some(entry)).await;
    let uri = format!("/api/expense/{}", body["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&mallory), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let (_, body) = send(&app, Method::GET, "/api/users", Some(&alice), None).await;
    assert_eq!(body["expenses_balance"], 600.0);
}

#[tokio::test]
async fn test_names_and_password_change() {
    let app = app().await;
    let token = login(&app, "carol").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/users",
        Some(&token),
        Some(json!({ "first_name": "Carol", "second_name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users",
        Some(&token),
        Some(json!({ "first_name": "Carol", "second_name": "Jones" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Names updated");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/change-password",
        Some(&token),
        Some(json!({ "old_password": "wrong", "new_password": "pw2" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/change-password",
        Some(&token),
        Some(json!({ "old_password": "pw1", "new_password": "pw2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "carol", "password": "pw2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_advice_route() {
    let app = app().await;
    let token = login(&app, "dave").await;
    let entry = json!({ "category": "food", "amount": 50.0, "date": "2024-03-01", "description": "groceries" });
    send(&app, Method::POST, "/api/expense", Some(&token), Some(entry)).await;

    let (status, body) = send(&app, Method::GET, "/api/ai-advice", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["advice"], "Cook at home more often.");
}

#[tokio::test]
async fn test_advice_provider_failure_is_bad_gateway() {
    let app = app_with(StubAdviceClient::default()).await;
    let token = login(&app, "erin").await;

    let (status, body) = send(&app, Method::GET, "/api/ai-advice", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "UPSTREAM_FAILURE");
}

#[tokio::test]
async fn test_fractional_amounts_keep_balances_exact() {
    let app = app().await;
    let token = login(&app, "dora").await;

    let mut uris = Vec::new();
    for amount in [0.1, 0.2] {
        let entry = json!({ "category": "snack", "amount": amount, "date": "2024-05-01" });
        let (status, body) = send(&app, Method::POST, "/api/expense", Some(&token), Some(entry)).await;
        assert_eq!(status, StatusCode::CREATED);
        uris.push(format!("/api/expense/{}", body["id"]));
    }

    let (_, body) = send(&app, Method::GET, "/api/users", Some(&token), None).await;
    assert_eq!(body["expenses_balance"], 0.3);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/expense?from=2024-05-01&to=2024-05-01",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body[0]["amount"], 0.1);

    for uri in &uris {
        let (status, _) = send(&app, Method::DELETE, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, body) = send(&app, Method::GET, "/api/users", Some(&token), None).await;
    assert_eq!(body["expenses_balance"], 0.0);
}
