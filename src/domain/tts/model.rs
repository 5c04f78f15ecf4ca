use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Characters accepted by the neural engine in a single request
pub const NEURAL_BUDGET: usize = 3000;
/// Characters accepted by the standard engine in a single request
pub const STANDARD_BUDGET: usize = 6000;

/// Provider synthesis backend tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Standard,
    #[default]
    Neural,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Standard => "standard",
            Engine::Neural => "neural",
        }
    }

    /// Maximum characters per synthesis call for this engine
    pub fn budget(&self) -> usize {
        match self {
            Engine::Standard => STANDARD_BUDGET,
            Engine::Neural => NEURAL_BUDGET,
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Engine::Standard),
            "neural" => Ok(Engine::Neural),
            other => Err(format!("Unsupported engine '{}'. Use 'standard' or 'neural'", other)),
        }
    }
}

/// Audio container returned by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Mp3,
    OggVorbis,
    Pcm,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::OggVorbis => "ogg_vorbis",
            OutputFormat::Pcm => "pcm",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::OggVorbis => "ogg",
            OutputFormat::Pcm => "pcm",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "audio/mpeg",
            OutputFormat::OggVorbis => "audio/ogg",
            OutputFormat::Pcm => "audio/pcm",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mp3" => Ok(OutputFormat::Mp3),
            "ogg" | "ogg_vorbis" => Ok(OutputFormat::OggVorbis),
            "pcm" => Ok(OutputFormat::Pcm),
            other => Err(format!(
                "Unsupported output format '{}'. Use 'mp3', 'ogg_vorbis' or 'pcm'",
                other
            )),
        }
    }
}

/// SSML speaking rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProsodyRate {
    XSlow,
    Slow,
    #[default]
    Medium,
    Fast,
    XFast,
}

impl ProsodyRate {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProsodyRate::XSlow => "x-slow",
            ProsodyRate::Slow => "slow",
            ProsodyRate::Medium => "medium",
            ProsodyRate::Fast => "fast",
            ProsodyRate::XFast => "x-fast",
        }
    }
}

impl FromStr for ProsodyRate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x-slow" => Ok(ProsodyRate::XSlow),
            "slow" => Ok(ProsodyRate::Slow),
            "" | "medium" => Ok(ProsodyRate::Medium),
            "fast" => Ok(ProsodyRate::Fast),
            "x-fast" => Ok(ProsodyRate::XFast),
            other => Err(format!("Unsupported rate '{}'", other)),
        }
    }
}

/// SSML pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProsodyPitch {
    XLow,
    Low,
    #[default]
    Medium,
    High,
    XHigh,
}

impl ProsodyPitch {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProsodyPitch::XLow => "x-low",
            ProsodyPitch::Low => "low",
            ProsodyPitch::Medium => "medium",
            ProsodyPitch::High => "high",
            ProsodyPitch::XHigh => "x-high",
        }
    }
}

impl FromStr for ProsodyPitch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x-low" => Ok(ProsodyPitch::XLow),
            "low" => Ok(ProsodyPitch::Low),
            "" | "medium" => Ok(ProsodyPitch::Medium),
            "high" => Ok(ProsodyPitch::High),
            "x-high" => Ok(ProsodyPitch::XHigh),
            other => Err(format!("Unsupported pitch '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Prosody {
    pub rate: ProsodyRate,
    pub pitch: ProsodyPitch,
}

/// A single user submission. Built once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    text: String,
    voice_id: String,
    engine: Engine,
    format: OutputFormat,
    prosody: Option<Prosody>,
}

impl TextRequest {
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>, engine: Engine) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            engine,
            format: OutputFormat::default(),
            prosody: None,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_ssml(mut self, prosody: Prosody) -> Self {
        self.prosody = Some(prosody);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn prosody(&self) -> Option<Prosody> {
        self.prosody
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Character budget used when planning segments.
    ///
    /// SSML requests get half the engine budget so the markup added around
    /// each segment stays within the provider's total request size.
    pub fn budget(&self) -> usize {
        match self.prosody {
            Some(_) => self.engine.budget() / 2,
            None => self.engine.budget(),
        }
    }
}

/// A bounded slice of the original text sent in one synthesis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub index: usize,
    pub text: String,
}

impl Segment {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// A provider voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub language: String,
    pub language_code: String,
    pub engines: Vec<Engine>,
}

impl Voice {
    pub fn supports(&self, engine: Engine) -> bool {
        self.engines.contains(&engine)
    }

    /// Engine to use when the caller has no preference
    pub fn preferred_engine(&self) -> Engine {
        if self.supports(Engine::Neural) || self.engines.is_empty() {
            Engine::Neural
        } else {
            Engine::Standard
        }
    }
}

/// Where a finished request should be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A uniquely named file in the output directory
    Generated,
    /// An explicit path chosen by the user
    Path(PathBuf),
}

/// A written audio file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub path: PathBuf,
    pub filename: String,
    pub size_bytes: u64,
    pub segment_count: usize,
    pub char_count: usize,
}
