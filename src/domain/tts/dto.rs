use super::error::TtsServiceError;
use super::model::{Engine, OutputFile, OutputFormat, Prosody, TextRequest};
use serde::{Deserialize, Serialize};

pub const DEFAULT_VOICE: &str = "Joanna";

/// Request for POST /api/generate and POST /api/tts/synthesize
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, alias = "useSSML")]
    pub use_ssml: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<String>,
}

impl GenerateRequest {
    /// Parse selections into a domain request, rejecting unknown values
    pub fn into_text_request(self) -> Result<TextRequest, TtsServiceError> {
        let engine = parse_or_default::<Engine>(self.engine.as_deref())?;
        let format = parse_or_default::<OutputFormat>(self.format.as_deref())?;
        let voice = self
            .voice
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VOICE.to_string());

        let mut request =
            TextRequest::new(self.text.trim(), voice.trim(), engine).with_format(format);
        if self.use_ssml {
            let prosody = Prosody {
                rate: parse_or_default(self.rate.as_deref())?,
                pitch: parse_or_default(self.pitch.as_deref())?,
            };
            request = request.with_ssml(prosody);
        }
        Ok(request)
    }
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T, TtsServiceError>
where
    T: std::str::FromStr<Err = String> + Default,
{
    match value {
        Some(v) if !v.trim().is_empty() => v.parse().map_err(TtsServiceError::Invalid),
        _ => Ok(T::default()),
    }
}

/// Response for POST /api/generate
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub filename: String,
    pub size: u64,
    pub segments: usize,
    pub characters: usize,
    pub download_url: String,
}

impl From<OutputFile> for GenerateResponse {
    fn from(output: OutputFile) -> Self {
        Self {
            success: true,
            download_url: format!("/download/{}", output.filename),
            filename: output.filename,
            size: output.size_bytes,
            segments: output.segment_count,
            characters: output.char_count,
        }
    }
}

/// Response for POST /api/upload
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub text: String,
    pub length: usize,
    pub stored_as: String,
}
