use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub aws_region: String,
    /// Named AWS profile; `None` uses the default credential chain
    pub aws_profile: Option<String>,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub output_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub max_text_chars: usize,
    pub voice_cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; missing keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = Config {
            host: get("HOST", "0.0.0.0"),
            port: get("PORT", "5000").parse()?,
            aws_region: get("AWS_REGION", "us-east-1"),
            aws_profile: lookup("AWS_PROFILE").filter(|p| !p.trim().is_empty()),
            environment: match get("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match get("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            output_dir: PathBuf::from(get("OUTPUT_DIR", "output")),
            upload_dir: PathBuf::from(get("UPLOAD_DIR", "uploads")),
            max_upload_bytes: get("MAX_UPLOAD_BYTES", "16777216").parse()?,
            max_text_chars: get("MAX_TEXT_CHARS", "100000").parse()?,
            voice_cache_ttl_secs: get("VOICE_CACHE_TTL_SECS", "3600").parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn voice_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.voice_cache_ttl_secs)
    }
}
