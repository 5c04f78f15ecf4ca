use async_trait::async_trait;
use aws_sdk_polly::config::retry::RetryConfig;
use aws_sdk_polly::config::Credentials;
use aws_sdk_polly::Client as PollyClient;
use podcast_generator::domain::tts::{Engine, Voice};
use podcast_generator::infrastructure::repositories::{
    SynthesisError, SynthesisRequest, TtsRepository,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Polly client pointed at a port nothing listens on
pub fn create_unreachable_polly_client() -> PollyClient {
    let config = aws_sdk_polly::Config::builder()
        .behavior_version(aws_sdk_polly::config::BehaviorVersion::latest())
        .region(aws_sdk_polly::config::Region::new("us-east-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "e2e"))
        .retry_config(RetryConfig::disabled())
        .endpoint_url("http://127.0.0.1:9") // Non-existent endpoint for testing
        .build();

    PollyClient::from_conf(config)
}

/// Local endpoint that answers every Polly call with a throttling error.
/// Returns its base URL and a counter of requests received.
pub async fn spawn_throttling_polly() -> (String, Arc<AtomicUsize>) {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = axum::Router::new().fallback(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (
                StatusCode::BAD_REQUEST,
                [
                    ("x-amzn-ErrorType", "ThrottlingException"),
                    ("content-type", "application/json"),
                ],
                r#"{"message":"Rate exceeded"}"#,
            )
                .into_response()
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), hits)
}

/// Minimal MP3 frame header prepended to every fake segment
pub const MP3_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];

/// In-process speech provider: echoes text behind an MP3 header and records calls
pub struct FakePolly {
    voices: Vec<Voice>,
    failure: Mutex<Option<SynthesisError>>,
    calls: Mutex<Vec<SynthesisRequest>>,
}

impl Default for FakePolly {
    fn default() -> Self {
        Self {
            voices: vec![
                voice("Joanna", "Female", "en-US", &[Engine::Standard, Engine::Neural]),
                voice("Matthew", "Male", "en-US", &[Engine::Standard, Engine::Neural]),
                voice("Ivy", "Female", "en-US", &[Engine::Standard]),
                voice("Amy", "Female", "en-GB", &[Engine::Standard, Engine::Neural]),
                voice("Lucia", "Female", "es-ES", &[Engine::Standard, Engine::Neural]),
            ],
            failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakePolly {
    /// Make every following synthesis call fail
    pub fn fail_with(&self, error: SynthesisError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<SynthesisRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Audio the fake produces for one segment
    pub fn audio_for(text: &str) -> Vec<u8> {
        let mut audio = MP3_HEADER.to_vec();
        audio.extend_from_slice(text.as_bytes());
        audio
    }
}

#[async_trait]
impl TtsRepository for FakePolly {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, SynthesisError> {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(Self::audio_for(&request.text))
    }

    async fn describe_voices(&self) -> Result<Vec<Voice>, SynthesisError> {
        Ok(self.voices.clone())
    }
}

fn voice(id: &str, gender: &str, language_code: &str, engines: &[Engine]) -> Voice {
    Voice {
        id: id.to_string(),
        name: id.to_string(),
        gender: gender.to_string(),
        language: language_code.to_string(),
        language_code: language_code.to_string(),
        engines: engines.to_vec(),
    }
}
