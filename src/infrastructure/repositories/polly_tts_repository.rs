use super::tts_repository::{SynthesisError, SynthesisRequest, TextType, TtsRepository};
use crate::domain::tts::model::{Engine, OutputFormat, Voice};
use async_trait::async_trait;
use aws_sdk_polly::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    types::{
        Engine as PollyEngine, OutputFormat as PollyOutputFormat, TextType as PollyTextType,
        Voice as PollyVoice, VoiceId,
    },
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, SynthesisError> {
        let start_time = std::time::Instant::now();
        let engine = to_polly_engine(request.engine);

        tracing::debug!(
            voice = %request.voice_id,
            engine = ?engine,
            output_format = %request.format,
            ssml = request.text_type == TextType::Ssml,
            text_length = request.text.chars().count(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(&request.text)
            .text_type(to_polly_text_type(request.text_type))
            .voice_id(VoiceId::from(request.voice_id.as_str()))
            .output_format(to_polly_format(request.format))
            .engine(engine)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %DisplayErrorContext(&e),
                    voice = %request.voice_id,
                    engine = %request.engine,
                    text_length = request.text.chars().count(),
                    "AWS Polly synthesize_speech failed"
                );
                classify_sdk_error(&e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            SynthesisError::Network(format!("Failed to read audio stream: {}", e))
        })?;
        let audio_bytes = audio_stream.into_bytes().to_vec();

        tracing::info!(
            provider = "polly",
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_bytes.len(),
            "Polly call completed"
        );

        Ok(audio_bytes)
    }

    async fn describe_voices(&self) -> Result<Vec<Voice>, SynthesisError> {
        let mut voices = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .polly_client
                .describe_voices()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| {
                    tracing::error!(
                        error = %DisplayErrorContext(&e),
                        "AWS Polly describe_voices failed"
                    );
                    classify_sdk_error(&e)
                })?;

            voices.extend(output.voices().iter().filter_map(to_domain_voice));

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        Ok(voices)
    }
}

fn to_polly_engine(engine: Engine) -> PollyEngine {
    match engine {
        Engine::Standard => PollyEngine::Standard,
        Engine::Neural => PollyEngine::Neural,
    }
}

fn from_polly_engine(engine: &PollyEngine) -> Option<Engine> {
    match engine {
        PollyEngine::Standard => Some(Engine::Standard),
        PollyEngine::Neural => Some(Engine::Neural),
        _ => None,
    }
}

fn to_polly_format(format: OutputFormat) -> PollyOutputFormat {
    match format {
        OutputFormat::Mp3 => PollyOutputFormat::Mp3,
        OutputFormat::OggVorbis => PollyOutputFormat::OggVorbis,
        OutputFormat::Pcm => PollyOutputFormat::Pcm,
    }
}

fn to_polly_text_type(text_type: TextType) -> PollyTextType {
    match text_type {
        TextType::Text => PollyTextType::Text,
        TextType::Ssml => PollyTextType::Ssml,
    }
}

fn to_domain_voice(voice: &PollyVoice) -> Option<Voice> {
    let id = voice.id()?.as_str().to_string();
    Some(Voice {
        name: voice.name().unwrap_or(&id).to_string(),
        gender: voice.gender().map(|g| g.as_str().to_string()).unwrap_or_default(),
        language: voice.language_name().unwrap_or_default().to_string(),
        language_code: voice
            .language_code()
            .map(|c| c.as_str().to_string())
            .unwrap_or_default(),
        engines: voice
            .supported_engines()
            .iter()
            .filter_map(from_polly_engine)
            .collect(),
        id,
    })
}

fn classify_sdk_error<E, R>(err: &SdkError<E, R>) -> SynthesisError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err.as_service_error() {
        Some(service_err) => {
            let message = service_err
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| service_err.to_string());
            classify(service_err.code(), message)
        }
        None => {
            let message = DisplayErrorContext(err).to_string();
            match err {
                _ if message.to_lowercase().contains("credential") => {
                    SynthesisError::Authentication(message)
                }
                SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
                    SynthesisError::Network(message)
                }
                _ => SynthesisError::Provider(message),
            }
        }
    }
}

/// Map a Polly error code to the provider error taxonomy
fn classify(code: Option<&str>, message: String) -> SynthesisError {
    match code.unwrap_or_default() {
        "UnrecognizedClientException"
        | "InvalidSignatureException"
        | "InvalidClientTokenId"
        | "AccessDeniedException"
        | "ExpiredTokenException"
        | "MissingAuthenticationToken" => SynthesisError::Authentication(message),
        "ThrottlingException"
        | "TooManyRequestsException"
        | "LimitExceededException"
        | "ServiceQuotaExceededException" => SynthesisError::Throttled(message),
        "TextLengthExceededException" => SynthesisError::TextTooLong(message),
        "InvalidSsmlException"
        | "EngineNotSupportedException"
        | "LanguageNotSupportedException"
        | "InvalidSampleRateException"
        | "LexiconNotFoundException"
        | "MarksNotSupportedForFormatException"
        | "SsmlMarksNotSupportedForTextTypeException"
        | "ValidationException" => SynthesisError::InvalidRequest(message),
        _ => SynthesisError::Provider(message),
    }
}
