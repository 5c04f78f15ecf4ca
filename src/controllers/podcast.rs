use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Html,
    Json,
};
use std::sync::Arc;

use crate::{
    domain::tts::{
        dto::{GenerateRequest, GenerateResponse, UploadResponse},
        OutputFormat, OutputTarget, PodcastServiceApi, VoicesByLanguage,
    },
    error::{AppError, AppResult},
    infrastructure::storage::AudioStorage,
};

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub struct PodcastController {
    podcast_service: Arc<dyn PodcastServiceApi>,
    storage: Arc<AudioStorage>,
}

impl PodcastController {
    pub fn new(podcast_service: Arc<dyn PodcastServiceApi>, storage: Arc<AudioStorage>) -> Self {
        Self {
            podcast_service,
            storage,
        }
    }

    /// GET / - Web form
    pub async fn index() -> Html<&'static str> {
        Html(INDEX_HTML)
    }

    /// GET /api/voices - Voices grouped by language code
    pub async fn list_voices(
        State(controller): State<Arc<PodcastController>>,
    ) -> AppResult<Json<VoicesByLanguage>> {
        let voices = controller.podcast_service.list_voices().await?;
        Ok(Json(voices))
    }

    /// POST /api/generate - Convert text to an audio file and return its metadata
    pub async fn generate(
        State(controller): State<Arc<PodcastController>>,
        Json(request): Json<GenerateRequest>,
    ) -> AppResult<Json<GenerateResponse>> {
        let text_request = request.into_text_request()?;
        let output = controller
            .podcast_service
            .generate(&text_request, OutputTarget::Generated)
            .await?;

        Ok(Json(GenerateResponse::from(output)))
    }

    /// POST /api/tts/synthesize - Convert text to speech and return the audio
    pub async fn synthesize(
        State(controller): State<Arc<PodcastController>>,
        Json(request): Json<GenerateRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let text_request = request.into_text_request()?;
        let output = controller
            .podcast_service
            .generate(&text_request, OutputTarget::Generated)
            .await?;
        let audio = tokio::fs::read(&output.path).await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(text_request.format().content_type()),
        );
        headers.insert("X-Output-Filename", header_value(&output.filename)?);
        headers.insert("X-Segment-Count", HeaderValue::from(output.segment_count));
        headers.insert("X-Character-Count", HeaderValue::from(output.char_count));

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }

    /// POST /api/upload - Read an uploaded text file
    pub async fn upload(
        State(controller): State<Arc<PodcastController>>,
        mut multipart: Multipart,
    ) -> AppResult<Json<UploadResponse>> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error("Failed to read multipart field", e))?
        {
            if field.name() != Some("file") {
                continue;
            }

            let filename = field.file_name().unwrap_or_default().to_string();
            if filename.is_empty() {
                return Err(AppError::BadRequest("No file selected".to_string()));
            }

            let bytes = field
                .bytes()
                .await
                .map_err(|e| multipart_error("Failed to read file", e))?;
            let text = String::from_utf8(bytes.to_vec())
                .map_err(|_| AppError::BadRequest("File must be UTF-8 text".to_string()))?;

            let stored = controller.storage.save_upload(&filename, &bytes).await?;
            let stored_as = stored
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            return Ok(Json(UploadResponse {
                success: true,
                length: text.chars().count(),
                text,
                stored_as,
            }));
        }

        Err(AppError::BadRequest("No file provided".to_string()))
    }

    /// GET /download/:filename - Download a generated audio file
    pub async fn download(
        State(controller): State<Arc<PodcastController>>,
        Path(filename): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let path = controller
            .storage
            .resolve_download(&filename)
            .await
            .ok_or_else(|| AppError::NotFound(filename.clone()))?;
        let audio = tokio::fs::read(&path).await?;

        let content_type = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| {
                [OutputFormat::Mp3, OutputFormat::OggVorbis, OutputFormat::Pcm]
                    .into_iter()
                    .find(|f| f.extension() == ext)
            })
            .map(|f| f.content_type())
            .unwrap_or("application/octet-stream");

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers.insert(
            header::CONTENT_DISPOSITION,
            header_value(&format!("attachment; filename=\"{}\"", filename))?,
        );

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }
}

/// Oversized uploads surface as 413, anything else as a bad request
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{}: {}", context, err.body_text()))
    } else {
        AppError::BadRequest(format!("{}: {}", context, err.body_text()))
    }
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::Internal(format!("Invalid header value: {}", e)))
}
