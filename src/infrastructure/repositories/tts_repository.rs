use crate::domain::tts::model::{Engine, OutputFormat, Voice};
use async_trait::async_trait;

/// Whether the request text is plain text or an SSML document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextType {
    Text,
    Ssml,
}

/// One synthesis call. `text` must already fit the engine budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub text_type: TextType,
    pub voice_id: String,
    pub engine: Engine,
    pub format: OutputFormat,
}

/// Failures reported by the speech provider, carrying its message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("request throttled: {0}")]
    Throttled(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("text exceeds provider limit: {0}")]
    TextTooLong(String),
    #[error("network failure: {0}")]
    Network(String),
    #[error("provider error: {0}")]
    Provider(String),
}

/// Repository for speech synthesis.
/// Abstracts the underlying provider so domain code never sees SDK types.
///
/// Implementations perform exactly one outbound call per `synthesize` and
/// never retry on their own. Splitting text and merging audio is the caller's
/// job.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize one segment and return the raw audio bytes
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, SynthesisError>;

    /// List every voice the provider offers
    async fn describe_voices(&self) -> Result<Vec<Voice>, SynthesisError>;
}
