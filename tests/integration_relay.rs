mod common;

use std::fs;

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use url::Url;

use meetbook::config::RelayConfig;
use meetbook::http_config::HttpConfig;
use meetbook::relay;

/// Answers every request with what it received.
async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let reply = json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "origin": header("origin"),
        "host": header("host"),
        "contentType": header("content-type"),
        "body": String::from_utf8_lossy(&body),
    });
    ([("x-backend", "echo"), ("connection", "close")], Json(reply))
}

async fn echo_backend() -> Url {
    let router = Router::new()
        .route("/moved", get(|| async { Redirect::temporary("/elsewhere") }))
        .fallback(echo);
    common::spawn(router).await
}

fn static_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), "<html>meetbook</html>").unwrap();
    fs::create_dir(dir.path().join("assets")).unwrap();
    fs::write(dir.path().join("assets").join("app.js"), "console.log('hi');").unwrap();
    dir
}

fn relay_for(backend: Url, dir: &TempDir) -> Router {
    let config = RelayConfig::new(backend, 0, dir.path());
    relay::router(&config, HttpConfig::relay().build_client().unwrap())
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn test_serves_static_files_and_index_fallback() {
    let dir = static_dir();
    let app = relay_for(common::dead_url().await, &dir);

    let response = app
        .clone()
        .oneshot(Request::get("/assets/app.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "console.log('hi');");

    let response = app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "<html>meetbook</html>");

    // Client-side routes resolve to the page shell.
    let response = app
        .oneshot(Request::get("/calendars/c-1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "<html>meetbook</html>");
}

#[tokio::test]
async fn test_forwards_method_body_and_query() {
    let dir = static_dir();
    let app = relay_for(echo_backend().await, &dir);

    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/meetings/m-1?expand=true")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"title":"Standup"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-backend"], "echo");
    assert!(response.headers().get("connection").is_none());

    let echoed = body_json(response).await;
    assert_eq!(echoed["method"], "PUT");
    assert_eq!(echoed["path"], "/meetings/m-1");
    assert_eq!(echoed["query"], "expand=true");
    assert_eq!(echoed["contentType"], "application/json");
    assert_eq!(echoed["body"], r#"{"title":"Standup"}"#);
}

#[tokio::test]
async fn test_rewrites_origin_and_host() {
    let dir = static_dir();
    let backend = echo_backend().await;
    let app = relay_for(backend.clone(), &dir);

    let request = Request::get("/api/calendars")
        .header("host", "meetbook.example.com")
        .header("origin", "https://meetbook.example.com")
        .body(Body::empty())
        .unwrap();
    let echoed = body_json(app.clone().oneshot(request).await.unwrap()).await;

    let authority = format!(
        "{}:{}",
        backend.host_str().unwrap(),
        backend.port().unwrap()
    );
    assert_eq!(echoed["host"], authority.as_str());
    assert_eq!(echoed["origin"], format!("http://{}", authority).as_str());

    // No Origin in, none out.
    let request = Request::get("/api/calendars").body(Body::empty()).unwrap();
    let echoed = body_json(app.oneshot(request).await.unwrap()).await;
    assert!(echoed["origin"].is_null());
}

#[tokio::test]
async fn test_backend_redirects_and_errors_pass_through() {
    let dir = static_dir();
    let (backend, url) = common::spawn_backend().await;
    let app = relay_for(url.clone(), &dir);

    let response = app
        .clone()
        .oneshot(Request::get("/api/meetings/missing").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    backend.set_failing(true);
    let response = app
        .oneshot(Request::get("/api/meetings").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["message"], "database offline");

    let app = relay_for(echo_backend().await, &dir);
    let response = app
        .oneshot(Request::get("/api/moved").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()["location"], "/elsewhere");
}

#[tokio::test]
async fn test_unreachable_backend_is_bad_gateway() {
    let dir = static_dir();
    let app = relay_for(common::dead_url().await, &dir);

    let response = app
        .oneshot(Request::get("/api/meetings").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let dir = static_dir();
    let app = relay_for(echo_backend().await, &dir);

    let request = Request::post("/api/attachments")
        .body(Body::from(vec![b'x'; relay::MAX_BODY_BYTES + 1]))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_store_round_trip_through_relay() {
    let dir = static_dir();
    let (backend, url) = common::spawn_backend().await;
    let relay_url = common::spawn(relay_for(url, &dir)).await;

    let gateway = meetbook::HttpGateway::new(relay_url.join("/api").unwrap()).unwrap();
    let mut app = meetbook::App::new(gateway);
    app.select_tab(meetbook::RecordKind::Calendar).await.unwrap();
    app.update_draft_field(meetbook::DraftField::Title, "Team");
    app.submit_draft().await.unwrap();

    assert_eq!(app.store().len(meetbook::RecordKind::Calendar), 1);
    assert_eq!(backend.count("calendars"), 1);
}
