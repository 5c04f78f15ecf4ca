use crate::domain::tts::model::OutputFormat;
use chrono::Local;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Local directories for generated audio and uploaded source text
#[derive(Debug, Clone)]
pub struct AudioStorage {
    output_dir: PathBuf,
    upload_dir: PathBuf,
}

impl AudioStorage {
    pub fn new(output_dir: impl Into<PathBuf>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            upload_dir: upload_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Create both directories if they are missing
    pub async fn ensure_dirs(&self) -> io::Result<()> {
        fs::create_dir_all(&self.output_dir).await?;
        fs::create_dir_all(&self.upload_dir).await?;
        Ok(())
    }

    /// Whether the output directory exists and is a directory
    pub async fn is_ready(&self) -> bool {
        fs::metadata(&self.output_dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    /// A fresh, unique path in the output directory
    pub fn generated_path(&self, voice_id: &str, format: OutputFormat) -> PathBuf {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let suffix = &Uuid::new_v4().simple().to_string()[..8];
        let filename = format!(
            "podcast_{}_{}_{}.{}",
            sanitize(voice_id),
            timestamp,
            suffix,
            format.extension()
        );
        self.output_dir.join(filename)
    }

    /// Write audio to `path`, creating parent directories.
    ///
    /// Bytes go to a sibling `.part` file first and are renamed into place, so
    /// a failed write never leaves a truncated file under the final name.
    pub async fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<u64> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut partial = path.as_os_str().to_owned();
        partial.push(".part");
        let partial = PathBuf::from(partial);

        if let Err(e) = fs::write(&partial, bytes).await {
            let _ = fs::remove_file(&partial).await;
            return Err(e);
        }
        if let Err(e) = fs::rename(&partial, path).await {
            let _ = fs::remove_file(&partial).await;
            return Err(e);
        }

        tracing::info!(path = %path.display(), size = bytes.len(), "Audio file written");
        Ok(bytes.len() as u64)
    }

    /// Resolve a download name to a file inside the output directory.
    ///
    /// Returns `None` for names that could escape the directory or that do
    /// not exist.
    pub async fn resolve_download(&self, filename: &str) -> Option<PathBuf> {
        if !is_plain_filename(filename) {
            tracing::warn!(filename, "Rejected download name");
            return None;
        }
        let path = self.output_dir.join(filename);
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Some(path),
            _ => None,
        }
    }

    /// Keep an uploaded text file under the upload directory
    pub async fn save_upload(&self, original_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.upload_dir).await?;
        let stored = format!(
            "{}_{}",
            &Uuid::new_v4().simple().to_string()[..8],
            sanitize(original_name)
        );
        let path = self.upload_dir.join(stored);
        fs::write(&path, bytes).await?;
        tracing::info!(path = %path.display(), size = bytes.len(), "Upload stored");
        Ok(path)
    }
}

/// Replace anything that is not safe in a filename
fn sanitize(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains('/')
        && !name.contains('\\')
}
