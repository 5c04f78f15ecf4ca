use super::assembler::{AudioAssembler, SynthesisOptions};
use super::chunk_planner::{plan, plan_rendered};
use super::error::TtsServiceError;
use super::model::{OutputFile, OutputTarget, Segment, TextRequest, Voice};
use super::ssml;
use crate::infrastructure::repositories::TtsRepository;
use crate::infrastructure::storage::AudioStorage;
use async_trait::async_trait;
use moka::future::Cache;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

const VOICE_CATALOG_KEY: &str = "voices";

/// Voices grouped by language code
pub type VoicesByLanguage = BTreeMap<String, Vec<Voice>>;

pub struct PodcastService {
    tts_repo: Arc<dyn TtsRepository>,
    assembler: AudioAssembler,
    storage: Arc<AudioStorage>,
    max_text_chars: usize,
    voice_cache: Cache<&'static str, Arc<Vec<Voice>>>,
}

impl PodcastService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        storage: Arc<AudioStorage>,
        max_text_chars: usize,
        voice_cache_ttl: Duration,
    ) -> Self {
        let voice_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(voice_cache_ttl)
            .build();

        Self {
            assembler: AudioAssembler::new(tts_repo.clone()),
            tts_repo,
            storage,
            max_text_chars,
            voice_cache,
        }
    }
}

#[async_trait]
pub trait PodcastServiceApi: Send + Sync {
    /// Turn a text request into an audio file
    ///
    /// This operation:
    /// - Validates the request before any synthesis call
    /// - Checks the voice supports the requested engine
    /// - Plans segments within the engine budget
    /// - Synthesizes segments in order, all or nothing
    /// - Writes the merged audio to `target`
    async fn generate(
        &self,
        request: &TextRequest,
        target: OutputTarget,
    ) -> Result<OutputFile, TtsServiceError>;

    /// Provider voices grouped by language code
    async fn list_voices(&self) -> Result<VoicesByLanguage, TtsServiceError>;

    /// Look a voice up by id or display name
    async fn find_voice(&self, id: &str) -> Result<Option<Voice>, TtsServiceError>;
}

#[async_trait]
impl PodcastServiceApi for PodcastService {
    async fn generate(
        &self,
        request: &TextRequest,
        target: OutputTarget,
    ) -> Result<OutputFile, TtsServiceError> {
        let char_count = request.char_count();
        tracing::info!(
            voice = request.voice_id(),
            engine = %request.engine(),
            format = %request.format(),
            ssml = request.prosody().is_some(),
            text_length = char_count,
            "Podcast generation request"
        );

        // 1. Validate input
        self.validate(request)?;

        // 2. Voice/engine combination, resolved to the provider's voice id
        let voice_id = self.guard_voice(request).await?;

        // 3. Plan segments within the engine budget
        let segments = plan_segments(request);
        if segments.is_empty() {
            return Err(TtsServiceError::Invalid("Nothing to synthesize".to_string()));
        }

        // 4. Synthesize in order
        let options = SynthesisOptions {
            voice_id: voice_id.clone(),
            engine: request.engine(),
            format: request.format(),
            prosody: request.prosody(),
        };
        let audio = self.assembler.assemble(&segments, &options).await?;

        // 5. Write the file
        let path = match target {
            OutputTarget::Generated => self
                .storage
                .generated_path(&voice_id, request.format()),
            OutputTarget::Path(path) => path,
        };
        let size_bytes = self.storage.write(&path, &audio).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(OutputFile {
            path,
            filename,
            size_bytes,
            segment_count: segments.len(),
            char_count,
        })
    }

    async fn list_voices(&self) -> Result<VoicesByLanguage, TtsServiceError> {
        let voices = self.voice_catalog().await?;
        let mut grouped = VoicesByLanguage::new();
        for voice in voices.iter() {
            grouped
                .entry(voice.language_code.clone())
                .or_default()
                .push(voice.clone());
        }
        for voices in grouped.values_mut() {
            voices.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(grouped)
    }

    async fn find_voice(&self, id: &str) -> Result<Option<Voice>, TtsServiceError> {
        let voices = self.voice_catalog().await?;
        Ok(voices
            .iter()
            .find(|v| v.id.eq_ignore_ascii_case(id) || v.name.eq_ignore_ascii_case(id))
            .cloned())
    }
}

impl PodcastService {
    fn validate(&self, request: &TextRequest) -> Result<(), TtsServiceError> {
        if request.text().trim().is_empty() {
            return Err(TtsServiceError::Invalid("No text provided".to_string()));
        }
        if request.voice_id().trim().is_empty() {
            return Err(TtsServiceError::Invalid("No voice selected".to_string()));
        }
        if request.char_count() > self.max_text_chars {
            return Err(TtsServiceError::TooLong(format!(
                "Maximum {} characters per request, got {}",
                self.max_text_chars,
                request.char_count()
            )));
        }
        Ok(())
    }

    /// Reject voices the provider does not offer for the engine and return
    /// the catalog id to send. The check is skipped when the catalog cannot
    /// be fetched; the provider still rejects bad combinations itself.
    async fn guard_voice(&self, request: &TextRequest) -> Result<String, TtsServiceError> {
        let voice = match self.find_voice(request.voice_id()).await {
            Ok(voice) => voice,
            Err(e) => {
                tracing::warn!(error = %e, "Voice catalog unavailable, skipping voice check");
                return Ok(request.voice_id().to_string());
            }
        };

        match voice {
            None => Err(TtsServiceError::Invalid(format!(
                "Unknown voice '{}'",
                request.voice_id()
            ))),
            Some(voice) if !voice.supports(request.engine()) => {
                Err(TtsServiceError::Invalid(format!(
                    "Voice '{}' does not support the {} engine",
                    voice.id,
                    request.engine()
                )))
            }
            Some(voice) => Ok(voice.id),
        }
    }

    async fn voice_catalog(&self) -> Result<Arc<Vec<Voice>>, TtsServiceError> {
        let tts_repo = self.tts_repo.clone();
        self.voice_cache
            .try_get_with(VOICE_CATALOG_KEY, async move {
                let voices = tts_repo.describe_voices().await?;
                tracing::info!(voice_count = voices.len(), "Voice catalog loaded");
                Ok::<_, TtsServiceError>(Arc::new(voices))
            })
            .await
            .map_err(|e| match e.provider_error() {
                Some(source) => TtsServiceError::Dependency(source.clone()),
                None => TtsServiceError::Other(anyhow::anyhow!("{}", e)),
            })
    }
}

/// SSML segments are re-split until the rendered markup fits the engine limit
fn plan_segments(request: &TextRequest) -> Vec<Segment> {
    match request.prosody() {
        Some(prosody) => plan_rendered(
            request.text(),
            request.budget(),
            request.engine().budget(),
            |text| ssml::render(text, prosody).chars().count(),
        ),
        None => plan(request.text(), request.budget()),
    }
}
