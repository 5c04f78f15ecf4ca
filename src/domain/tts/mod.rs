pub mod assembler;
pub mod chunk_planner;
pub mod dto;
pub mod error;
pub mod model;
pub mod service;
pub mod ssml;

pub use assembler::{AudioAssembler, SynthesisOptions};
pub use chunk_planner::plan;
pub use error::TtsServiceError;
pub use model::{
    Engine, OutputFile, OutputFormat, OutputTarget, Prosody, Segment, TextRequest, Voice,
};
pub use service::{PodcastService, PodcastServiceApi, VoicesByLanguage};
