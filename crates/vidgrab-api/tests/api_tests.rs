//! API integration tests.
//!
//! The extraction tool is stood in by stub shell scripts written to a
//! temp dir and injected through the tool locator, so every test runs
//! hermetically against the real request pipeline.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use vidgrab_api::{create_router, ApiConfig, AppState, DeliveryMode};
use vidgrab_media::ToolLocator;

fn stub_tool(dir: &tempfile::TempDir, script: &str) -> PathBuf {
    let path = dir.path().join("yt-dlp");
    std::fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn app_with_stub(stub: PathBuf) -> axum::Router {
    let state = AppState::with_locator(
        ApiConfig::default(),
        ToolLocator::with_candidates(vec![stub]),
    );
    create_router(state, None)
}

fn app_without_tool() -> axum::Router {
    let state = AppState::with_locator(
        ApiConfig::default(),
        ToolLocator::with_candidates(Vec::new()),
    );
    create_router(state, None)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn info_request(url: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/video/info")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(format!("{{\"url\":\"{url}\"}}")))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_stub(stub_tool(&dir, "exit 0"));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["ytdlp"], "available");
}

#[tokio::test]
async fn test_health_reports_missing_tool() {
    let app = app_without_tool();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["ytdlp"], "missing");
}

#[tokio::test]
async fn test_info_happy_path() {
    let dir = tempfile::tempdir().unwrap();
    let stub = stub_tool(
        &dir,
        r#"echo '{"id":"abc123","title":"Test","duration":42}'"#,
    );
    let app = app_with_stub(stub);

    let response = app
        .oneshot(info_request("https://www.youtube.com/watch?v=abc123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], "abc123");
    assert_eq!(body["title"], "Test");
    assert_eq!(body["thumbnail"], "");
    assert_eq!(body["duration"], 42.0);
    assert_eq!(body["formats"].as_array().unwrap().len(), 0);
    assert_eq!(body["platform"], "youtube");
}

#[tokio::test]
async fn test_info_private_video_is_403() {
    let dir = tempfile::tempdir().unwrap();
    let stub = stub_tool(&dir, "echo 'ERROR: Sign in to confirm' >&2; exit 1");
    let app = app_with_stub(stub);

    let response = app
        .oneshot(info_request("https://www.youtube.com/watch?v=abc123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(
        message.contains("private") || message.contains("authentication"),
        "unexpected message: {message}"
    );
}

#[tokio::test]
async fn test_info_unavailable_video_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let stub = stub_tool(&dir, "echo 'ERROR: Video unavailable' >&2; exit 1");
    let app = app_with_stub(stub);

    let response = app
        .oneshot(info_request("https://www.youtube.com/watch?v=abc123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_platform_never_spawns_tool() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("invoked");
    let stub = stub_tool(&dir, &format!("touch {}", marker.display()));
    let app = app_with_stub(stub);

    let response = app
        .oneshot(info_request("https://example.com/video"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("Unsupported platform"));
    assert!(!marker.exists(), "tool was invoked for a rejected URL");
}

#[tokio::test]
async fn test_missing_tool_is_500_without_spawn() {
    let app = app_without_tool();

    let response = app
        .oneshot(info_request("https://www.youtube.com/watch?v=abc123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("yt-dlp not found"));
}

#[tokio::test]
async fn test_info_requires_url() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_stub(stub_tool(&dir, "exit 0"));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/video/info")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "URL is required");
}

#[tokio::test]
async fn test_info_rejects_oversized_url() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_stub(stub_tool(&dir, "exit 0"));

    let long_url = format!("https://www.youtube.com/watch?v={}", "a".repeat(2500));
    let response = app.oneshot(info_request(&long_url)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_info_via_query_parameter() {
    let dir = tempfile::tempdir().unwrap();
    let stub = stub_tool(&dir, r#"echo '{"id":"qq1","title":"Query"}'"#);
    let app = app_with_stub(stub);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/video/info?url=https://youtu.be/qq1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], "qq1");
}

#[tokio::test]
async fn test_download_streams_bytes_with_headers() {
    let dir = tempfile::tempdir().unwrap();
    let stub = stub_tool(&dir, "printf 'MEDIA BYTES'");
    let app = app_with_stub(stub);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/video/download?url=https://youtu.be/abc123&format=mp3&quality=192")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "audio/mpeg"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.starts_with("attachment; filename=\"video_"));
    assert!(disposition.ends_with(".mp3\""));
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-cache"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"MEDIA BYTES");
}

#[tokio::test]
async fn test_download_defaults_to_mp4() {
    let dir = tempfile::tempdir().unwrap();
    let stub = stub_tool(&dir, "printf 'x'");
    let app = app_with_stub(stub);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/video/download?url=https://youtu.be/abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "video/mp4"
    );
}

#[tokio::test]
async fn test_download_rejects_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_stub(stub_tool(&dir, "exit 0"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/video/download?url=https://youtu.be/abc123&format=webm")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid format");
}

#[tokio::test]
async fn test_download_ignores_dead_format_id_parameter() {
    let dir = tempfile::tempdir().unwrap();
    let stub = stub_tool(&dir, "printf 'x'");
    let app = app_with_stub(stub);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/video/download?url=https://youtu.be/abc123&format_id=http-2176")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Selection proceeds on format/quality alone
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_download_redirect_mode() {
    let dir = tempfile::tempdir().unwrap();
    let stub = stub_tool(&dir, "echo 'https://cdn.example/media.mp4'");
    let config = ApiConfig {
        delivery_mode: DeliveryMode::Redirect,
        ..ApiConfig::default()
    };
    let state = AppState::with_locator(config, ToolLocator::with_candidates(vec![stub]));
    let app = create_router(state, None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/video/download?url=https://youtu.be/abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://cdn.example/media.mp4"
    );
}

#[tokio::test]
async fn test_download_tool_failure_before_spawn_is_json_error() {
    let app = app_without_tool();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/video/download?url=https://youtu.be/abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("yt-dlp not found"));
}

#[tokio::test]
async fn test_security_headers_present() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_stub(stub_tool(&dir, "exit 0"));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
    assert!(response.headers().contains_key("X-Request-ID"));
}
