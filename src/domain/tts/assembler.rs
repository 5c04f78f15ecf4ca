use super::error::TtsServiceError;
use super::model::{Engine, OutputFormat, Prosody, Segment};
use super::ssml;
use crate::infrastructure::repositories::{SynthesisRequest, TextType, TtsRepository};
use std::sync::Arc;
use std::time::Instant;

/// Voice settings shared by every segment of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOptions {
    pub voice_id: String,
    pub engine: Engine,
    pub format: OutputFormat,
    pub prosody: Option<Prosody>,
}

impl SynthesisOptions {
    fn request_for(&self, segment: &Segment) -> SynthesisRequest {
        let (text, text_type) = match self.prosody {
            Some(prosody) => (ssml::render(&segment.text, prosody), TextType::Ssml),
            None => (segment.text.clone(), TextType::Text),
        };
        SynthesisRequest {
            text,
            text_type,
            voice_id: self.voice_id.clone(),
            engine: self.engine,
            format: self.format,
        }
    }
}

/// Drives one synthesis call per segment and concatenates the audio
pub struct AudioAssembler {
    tts_repo: Arc<dyn TtsRepository>,
}

impl AudioAssembler {
    pub fn new(tts_repo: Arc<dyn TtsRepository>) -> Self {
        Self { tts_repo }
    }

    /// Synthesize segments strictly in order and merge their audio.
    ///
    /// Stops at the first failing segment; later segments are never sent and
    /// no partial audio is returned.
    pub async fn assemble(
        &self,
        segments: &[Segment],
        options: &SynthesisOptions,
    ) -> Result<Vec<u8>, TtsServiceError> {
        let start_time = Instant::now();
        let mut merged_audio = Vec::new();

        for segment in segments {
            tracing::info!(
                segment_index = segment.index,
                segment_size = segment.char_count(),
                voice = %options.voice_id,
                engine = %options.engine,
                "Synthesizing segment"
            );

            let request = options.request_for(segment);
            let audio = self.tts_repo.synthesize(&request).await.map_err(|source| {
                tracing::error!(
                    segment_index = segment.index,
                    error = %source,
                    "Segment synthesis failed, aborting request"
                );
                TtsServiceError::Synthesis {
                    index: segment.index,
                    source,
                }
            })?;
            merged_audio.extend_from_slice(&audio);

            tracing::debug!(
                segment_index = segment.index,
                total_audio_size = merged_audio.len(),
                "Segment synthesized and merged"
            );
        }

        tracing::info!(
            segment_count = segments.len(),
            audio_size_bytes = merged_audio.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Audio assembled"
        );

        Ok(merged_audio)
    }
}
