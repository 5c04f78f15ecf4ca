use crate::e2e::helpers;

use helpers::aws_mocks::FakePolly;
use helpers::{spawn_app_in, TestContext};
use hyper::StatusCode;
use std::sync::Arc;
use tempfile::TempDir;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ready_status(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(body.get("storage").and_then(|v| v.as_str()), Some("available"));
    assert!(body.get("tts").is_some());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_not_ready_when_output_dir_is_gone(ctx: &TestContext) {
    std::fs::remove_dir_all(ctx.storage.output_dir()).unwrap();

    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("not_ready"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_health_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_echo_incoming_request_id(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_header("/health", "x-request-id", "trace-abc-123")
        .await
        .unwrap();

    response.assert_header("x-request-id", "trace-abc-123");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_different_endpoints_for_liveness_and_readiness(ctx: &TestContext) {
    let liveness_response = ctx.client.get("/health").await.unwrap();
    liveness_response.assert_status(StatusCode::OK);

    let readiness_response = ctx.client.get("/health/ready").await.unwrap();
    readiness_response.assert_status(StatusCode::OK);

    assert!(liveness_response.body.is_none()); // Plain text
    assert!(readiness_response.body.is_some()); // JSON
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_allow_cross_origin_requests_in_development(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_header("/health", "origin", "http://localhost:3000")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.assert_header("access-control-allow-origin", "*");
}

#[tokio::test]
async fn it_should_not_allow_cross_origin_requests_in_production() {
    let dir = TempDir::new().unwrap();
    let (client, _storage) =
        spawn_app_in("production", Arc::new(FakePolly::default()), &dir).await;

    let response = client
        .get_with_header("/health", "origin", "http://localhost:3000")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert!(response.header("access-control-allow-origin").is_none());
}
