use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use sparkmatch::config::Config;
use sparkmatch::services::mailer::RecordingMailer;
use sparkmatch::state::AppState;
use sparkmatch::web;

async fn test_app() -> Router {
    // Single connection so every request sees the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    sparkmatch::MIGRATOR.run(&pool).await.expect("migrations");

    let config = Config {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        admin_email: "admin@example.com".into(),
        like_notify_threshold: 50,
        mail_api_url: String::new(),
        mail_api_key: String::new(),
        mail_from: "Sparkmatch <alerts@sparkmatch.app>".into(),
        auth_pepper: "test-pepper".into(),
    };

    let state = AppState {
        pool,
        config: Arc::new(config),
        mailer: Arc::new(RecordingMailer::default()),
    };
    web::router(state)
}

async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register(app: &Router, name: &str, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": "hunter2hunter2",
            "age": 28,
            "gender": "female",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    let user_id = body["data"]["user"]["id"].as_str().unwrap().to_string();
    let token = body["data"]["token"].as_str().unwrap().to_string();
    (user_id, token)
}

#[tokio::test]
async fn preference_round_trip_over_http() {
    let app = test_app().await;
    let (_u1, t1) = register(&app, "U1", "u1@example.com").await;
    let (u2, _t2) = register(&app, "U2", "u2@example.com").await;

    // U1 likes U2
    let (status, body) = send(&app, "POST", &format!("/people/{u2}/like"), Some(&t1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["liked_user_id"], json!(u2));

    // Liking again is a conflict
    let (status, body) = send(&app, "POST", &format!("/people/{u2}/like"), Some(&t1), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));

    // A dislike replaces the like
    let (status, _) = send(
        &app,
        "POST",
        &format!("/people/{u2}/dislike"),
        Some(&t1),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // And a fresh like replaces the dislike
    let (status, _) = send(&app, "POST", &format!("/people/{u2}/like"), Some(&t1), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn self_preference_and_unknown_target() {
    let app = test_app().await;
    let (u1, t1) = register(&app, "U1", "u1@example.com").await;

    let (status, _) = send(&app, "POST", &format!("/people/{u1}/like"), Some(&t1), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/people/nope/like", Some(&t1), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = test_app().await;

    let (status, _) = send(&app, "GET", "/people/recommended", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/auth/me", Some("bogus-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn recommended_excludes_acted_on_users() {
    let app = test_app().await;
    let (_u1, t1) = register(&app, "U1", "u1@example.com").await;
    let (u2, _) = register(&app, "U2", "u2@example.com").await;
    let (u3, _) = register(&app, "U3", "u3@example.com").await;

    let (status, _) = send(&app, "POST", &format!("/people/{u2}/like"), Some(&t1), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/people/recommended", Some(&t1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["meta"]["total"], json!(1));
    let users = body["data"]["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], json!(u3));

    // Liked listing shows the acted-on user
    let (status, body) = send(&app, "GET", "/people/liked", Some(&t1), None).await;
    assert_eq!(status, StatusCode::OK);
    let liked = body["data"]["data"].as_array().unwrap();
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0]["id"], json!(u2));
}

#[tokio::test]
async fn auth_flow_over_http() {
    let app = test_app().await;

    // Underage registration fails validation
    let (status, _) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Kid",
            "email": "kid@example.com",
            "password": "hunter2hunter2",
            "age": 17,
            "gender": "male",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (user_id, token) = register(&app, "Anna", "anna@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "anna@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));

    let (status, body) = send(&app, "GET", "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(user_id));
    assert!(body["data"]["password_hash"].is_null());

    // Logout revokes the token
    let (status, _) = send(&app, "POST", "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
