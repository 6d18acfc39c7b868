use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::IntoResponse,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use mindflow_api::{build_router, config::Config, error::ApiError, state::AppState};
use mindflow_persist::{InMemoryStore, PersistError};
use mindflow_tools::ResourceSearch;

const CONFIG: &str = r#"
    [server]
    host = "127.0.0.1"
    port = 8000

    [cors]
    enabled = true
    origins = ["http://localhost:3000"]

    [mongodb]
    database = "test"
    pool_size = 2
    timeout_ms = 1000

    [logging]
    level = "debug"
    format = "pretty"
"#;

fn app() -> Router {
    let mut config: Config = toml::from_str(CONFIG).unwrap();
    config.mongodb_uri = "memory://".into();
    let state = AppState::new(
        config,
        Arc::new(InMemoryStore::new()),
        ResourceSearch::curated_only(),
    );
    build_router(Arc::new(state))
}

fn request(method: &str, uri: &str, owner: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(owner) = owner {
        builder = builder.header("x-user-id", owner);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["storage"], "connected");
    assert_eq!(body["services"]["search"], "curated");
}

#[tokio::test]
async fn test_missing_owner_is_unauthorized() {
    let app = app();
    let (status, body) = send(&app, request("GET", "/threads", None, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_create_put_get_round_trip() {
    let app = app();

    let (status, body) = send(
        &app,
        request("POST", "/threads", Some("alice"), Some(json!({"threadId": "t1"}))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["thread"]["title"], "New Conversation");
    assert_eq!(body["thread"]["messages"], json!([]));

    let update = json!({
        "title": "Hi",
        "messages": [
            {"id": "m1", "role": "user", "content": "Hi", "timestamp": "2026-01-05T10:00:00Z"},
            {"id": "m2", "role": "assistant", "content": "Hello there", "timestamp": "2026-01-05T10:00:02Z"}
        ],
        "version": 1
    });
    let (status, body) = send(&app, request("PUT", "/threads/t1", Some("alice"), Some(update))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, body) = send(&app, request("GET", "/threads/t1", Some("alice"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["thread"]["title"], "Hi");
    assert_eq!(body["thread"]["saveVersion"], 1);
    assert_eq!(body["thread"]["messages"][1]["content"], "Hello there");
}

#[tokio::test]
async fn test_create_requires_thread_id() {
    let app = app();
    let (status, body) = send(
        &app,
        request("POST", "/threads", Some("alice"), Some(json!({"title": "No id"}))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "threadId is required");
}

#[tokio::test]
async fn test_duplicate_thread_conflicts() {
    let app = app();
    let create = || request("POST", "/threads", Some("alice"), Some(json!({"threadId": "t1"})));

    let (status, _) = send(&app, create()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, create()).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_stale_version_conflicts() {
    let app = app();
    send(
        &app,
        request("POST", "/threads", Some("alice"), Some(json!({"threadId": "t1"}))),
    )
    .await;

    let newer = json!({"messages": [], "version": 2});
    let (status, _) = send(&app, request("PUT", "/threads/t1", Some("alice"), Some(newer))).await;
    assert_eq!(status, StatusCode::OK);

    let older = json!({"messages": [], "version": 1});
    let (status, body) = send(&app, request("PUT", "/threads/t1", Some("alice"), Some(older))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Stale write rejected");
}

#[tokio::test]
async fn test_threads_are_owner_scoped() {
    let app = app();
    send(
        &app,
        request("POST", "/threads", Some("alice"), Some(json!({"threadId": "t1", "title": "Mine"}))),
    )
    .await;

    let (status, _) = send(&app, request("GET", "/threads/t1", Some("bob"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, request("GET", "/threads", Some("bob"), None)).await;
    assert_eq!(body["threads"], json!([]));

    let (_, body) = send(&app, request("GET", "/threads", Some("alice"), None)).await;
    assert_eq!(body["threads"][0]["threadId"], "t1");
    assert_eq!(body["threads"][0]["title"], "Mine");
    assert!(body["threads"][0].get("messages").is_none());
}

#[tokio::test]
async fn test_delete_thread() {
    let app = app();
    send(
        &app,
        request("POST", "/threads", Some("alice"), Some(json!({"threadId": "t1"}))),
    )
    .await;

    let (status, body) = send(&app, request("DELETE", "/threads/t1", Some("alice"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, body) = send(&app, request("DELETE", "/threads/t1", Some("alice"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Thread not found");
}

#[tokio::test]
async fn test_update_missing_thread_is_not_found() {
    let app = app();
    let (status, _) = send(
        &app,
        request("PUT", "/threads/nope", Some("alice"), Some(json!({"title": "x"}))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_error_response() {
    let response = ApiError::BadRequest("Test error".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_storage_failure_hides_detail() {
    let response = ApiError::from(PersistError::Connection("db01 refused".into())).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"error": "Storage error"}));
}
