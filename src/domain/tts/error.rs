use crate::error::AppError;
use crate::infrastructure::repositories::SynthesisError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("text too long: {0}")]
    TooLong(String),
    #[error("segment {index} failed: {source}")]
    Synthesis {
        index: usize,
        #[source]
        source: SynthesisError,
    },
    #[error("dependency error: {0}")]
    Dependency(#[from] SynthesisError),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TtsServiceError {
    /// The provider failure behind this error, if any
    pub fn provider_error(&self) -> Option<&SynthesisError> {
        match self {
            TtsServiceError::Synthesis { source, .. } => Some(source),
            TtsServiceError::Dependency(source) => Some(source),
            _ => None,
        }
    }
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        let message = err.to_string();
        match err.provider_error() {
            Some(SynthesisError::Throttled(_)) => return AppError::RateLimitExceeded(message),
            Some(SynthesisError::TextTooLong(_)) => return AppError::PayloadTooLarge(message),
            Some(SynthesisError::InvalidRequest(_)) => return AppError::BadRequest(message),
            Some(_) => return AppError::ExternalService(message),
            None => {}
        }
        match err {
            TtsServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TtsServiceError::TooLong(msg) => AppError::PayloadTooLarge(msg),
            TtsServiceError::Storage(e) => AppError::Internal(format!("Storage error: {}", e)),
            other => AppError::Internal(other.to_string()),
        }
    }
}
