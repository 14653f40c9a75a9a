// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use vitatrack::config::Config;
use vitatrack::db::FirestoreDb;
use vitatrack::routes::create_router;
use vitatrack::services::SessionService;
use vitatrack::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with an offline mock store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    let sessions = SessionService::new(db.clone(), config.session_ttl_hours);

    let state = Arc::new(AppState {
        config,
        db,
        sessions,
    });

    (create_router(state.clone()), state)
}

/// Send a JSON POST without any session cookie.
#[allow(dead_code)]
pub async fn post_json(app: &axum::Router, uri: &str, body: Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a JSON POST carrying a session cookie.
#[allow(dead_code)]
pub async fn post_json_authed(app: &axum::Router, uri: &str, cookie: &str, body: Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, cookie)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a GET without any session cookie.
#[allow(dead_code)]
pub async fn get(app: &axum::Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a GET carrying a session cookie.
#[allow(dead_code)]
pub async fn get_authed(app: &axum::Router, uri: &str, cookie: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Decode a response body as JSON.
#[allow(dead_code)]
pub async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!(
            "response body is not JSON ({err}): {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

/// Extract the `name=value` pair of the session cookie from a Set-Cookie header.
#[allow(dead_code)]
pub fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("missing Set-Cookie header")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().trim().to_string()
}

/// Register a fresh user and log in. Returns the stored user id and the
/// session cookie pair to send on authenticated requests.
#[allow(dead_code)]
pub async fn register_and_login(
    app: &axum::Router,
    state: &AppState,
    email: &str,
) -> (String, String) {
    let response = post_json(
        app,
        "/api/auth/register",
        json!({
            "email": email,
            "password": "hunter2!",
            "username": "tester",
            "gender": "other",
            "age": 30,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let user_id = state
        .db
        .find_user_by_email(email)
        .await
        .unwrap()
        .expect("registered user should be stored")
        .user_id;

    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "email": email, "password": "hunter2!" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);

    (user_id, cookie)
}
