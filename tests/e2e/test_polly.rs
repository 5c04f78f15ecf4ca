use crate::e2e::helpers;

use aws_sdk_polly::config::Credentials;
use aws_sdk_polly::Client as PollyClient;
use helpers::aws_mocks::{create_unreachable_polly_client, spawn_throttling_polly};
use helpers::spawn_app;
use hyper::StatusCode;
use podcast_generator::domain::tts::{Engine, OutputFormat};
use podcast_generator::infrastructure::aws::polly_config_loader;
use podcast_generator::infrastructure::config::Config;
use podcast_generator::infrastructure::repositories::{
    PollyTtsRepository, SynthesisError, SynthesisRequest, TextType, TtsRepository,
};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn it_should_report_bad_gateway_when_polly_is_unreachable() {
    let dir = TempDir::new().unwrap();
    let polly = Arc::new(create_unreachable_polly_client());
    let (client, storage) = spawn_app(Arc::new(PollyTtsRepository::new(polly)), &dir).await;

    let response = client
        .post("/api/generate", &json!({ "text": "Nobody will hear this." }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("segment 0 failed");
    assert_eq!(std::fs::read_dir(storage.output_dir()).unwrap().count(), 0);
}

#[tokio::test]
async fn it_should_fail_voice_listing_when_polly_is_unreachable() {
    let dir = TempDir::new().unwrap();
    let polly = Arc::new(create_unreachable_polly_client());
    let (client, _storage) = spawn_app(Arc::new(PollyTtsRepository::new(polly)), &dir).await;

    let response = client.get("/api/voices").await.unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn it_should_call_polly_once_when_throttled() {
    let (endpoint, hits) = spawn_throttling_polly().await;
    let config = Config::from_lookup(|_| None).unwrap();
    let sdk_config = polly_config_loader(&config)
        .endpoint_url(endpoint)
        .credentials_provider(Credentials::new("test", "test", None, None, "e2e"))
        .load()
        .await;
    let repo = PollyTtsRepository::new(Arc::new(PollyClient::new(&sdk_config)));

    let result = repo
        .synthesize(&SynthesisRequest {
            text: "Hello.".to_string(),
            text_type: TextType::Text,
            voice_id: "Joanna".to_string(),
            engine: Engine::Neural,
            format: OutputFormat::Mp3,
        })
        .await;

    assert!(
        matches!(result, Err(SynthesisError::Throttled(_))),
        "got {:?}",
        result.map(|audio| audio.len())
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
