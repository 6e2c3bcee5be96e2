//! Model acquisition and caching
//!
//! Downloads the handwriting classifier to the platform data directory on
//! first use, with streaming writes, size sanity checks, and a SHA-256
//! manifest. Subsequent loads hit the cache.

use anyhow::{Context, Result};
use futures_util::StreamExt;
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Cached filename of the recognition model.
pub const MODEL_FILENAME: &str = "hanzi_rec.onnx";

/// Default download location for the reference classifier.
pub const DEFAULT_MODEL_URL: &str =
    "https://huggingface.co/monkt/paddleocr-onnx/resolve/main/languages/chinese/rec.onnx";

/// Plausible size bounds for the model file, in bytes. Anything outside this
/// range is treated as a corrupt or truncated download.
const EXPECTED_SIZE_RANGE: (u64, u64) = (1_000_000, 100_000_000);

/// Environment variable that forbids network access for model downloads.
pub const OFFLINE_ENV: &str = "HANZI_SCRIBE_OFFLINE";

/// Manifest tracking downloaded model files.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ModelManifest {
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ModelInfo {
    pub filename: String,
    pub url: String,
    pub size_bytes: u64,
    pub sha256: String,
    pub downloaded_at: String,
}

/// Manager for downloading and caching the classifier model.
pub struct ModelManager {
    models_dir: PathBuf,
    model_url: String,
    offline: bool,
}

impl ModelManager {
    /// Create a manager rooted at the platform data directory.
    pub fn new(model_url: impl Into<String>) -> Result<Self> {
        let data_dir = crate::storage::get_data_dir()?;
        Self::with_dir(data_dir.join("models"), model_url)
    }

    /// Create a manager with a custom cache directory.
    pub fn with_dir(models_dir: PathBuf, model_url: impl Into<String>) -> Result<Self> {
        std::fs::create_dir_all(&models_dir)?;
        Ok(Self {
            models_dir,
            model_url: model_url.into(),
            offline: std::env::var(OFFLINE_ENV).is_ok(),
        })
    }

    /// Forbid network access; acquisition fails unless the model is cached.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Path the model is (or will be) cached at.
    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join(MODEL_FILENAME)
    }

    /// Check whether a plausible model file is already cached.
    pub fn is_model_available(&self) -> bool {
        let path = self.model_path();
        if !path.exists() {
            return false;
        }

        match std::fs::metadata(&path) {
            Ok(metadata) => {
                let (min, max) = EXPECTED_SIZE_RANGE;
                let size = metadata.len();
                size >= min && size <= max
            }
            Err(_) => false,
        }
    }

    /// Download the model if not already cached.
    ///
    /// Returns the path to the model file.
    pub async fn ensure_model(&self) -> Result<PathBuf> {
        let path = self.model_path();

        if self.is_model_available() {
            info!("Model already available at {:?}", path);
            return Ok(path);
        }

        if self.offline {
            anyhow::bail!(
                "Offline mode: cannot download model. Download it manually from {} and place it at {:?}",
                self.model_url,
                path
            );
        }

        info!("Downloading model from {}", self.model_url);
        self.download_model(&path).await?;

        if !self.is_model_available() {
            anyhow::bail!("Download completed but model verification failed");
        }

        info!("Successfully downloaded model to {:?}", path);
        Ok(path)
    }

    async fn download_model(&self, path: &Path) -> Result<()> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .context("Failed to create HTTP client")?;

        let response = client
            .get(&self.model_url)
            .send()
            .await
            .context("Failed to send download request")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Download failed with status {}: {}",
                response.status(),
                self.model_url
            );
        }

        let total_size = response.content_length();
        debug!("Download size: {:?} bytes", total_size);

        // Stream into a temp file, rename into place on success
        let temp_path = path.with_extension("tmp");
        let mut file =
            std::fs::File::create(&temp_path).context("Failed to create temp file")?;

        let mut hasher = Sha256::new();
        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("Error reading download stream")?;
            file.write_all(&chunk)
                .context("Failed to write to temp file")?;
            hasher.update(&chunk);
            downloaded += chunk.len() as u64;
        }

        file.flush().context("Failed to flush temp file")?;
        drop(file);

        let sha256 = format!("{:x}", hasher.finalize());
        std::fs::rename(&temp_path, path)
            .context("Failed to move downloaded file to final location")?;

        self.record_download(downloaded, sha256)?;
        Ok(())
    }

    fn record_download(&self, size_bytes: u64, sha256: String) -> Result<()> {
        let mut manifest = self.load_manifest().unwrap_or_default();

        let info = ModelInfo {
            filename: MODEL_FILENAME.to_string(),
            url: self.model_url.clone(),
            size_bytes,
            sha256,
            downloaded_at: unix_timestamp_now(),
        };

        if let Some(existing) = manifest
            .models
            .iter_mut()
            .find(|m| m.filename == info.filename)
        {
            *existing = info;
        } else {
            manifest.models.push(info);
        }

        self.save_manifest(&manifest)
    }

    pub fn load_manifest(&self) -> Result<ModelManifest> {
        let manifest_path = self.models_dir.join("manifest.json");
        if manifest_path.exists() {
            let content = std::fs::read_to_string(&manifest_path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(ModelManifest::default())
        }
    }

    pub fn save_manifest(&self, manifest: &ModelManifest) -> Result<()> {
        let manifest_path = self.models_dir.join("manifest.json");
        let content = serde_json::to_string_pretty(manifest)?;
        std::fs::write(manifest_path, content)?;
        Ok(())
    }
}

/// Current Unix timestamp as a string (lightweight alternative to chrono).
fn unix_timestamp_now() -> String {
    use std::time::SystemTime;

    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{}", now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_model_path_uses_fixed_filename() {
        let dir = tempdir().unwrap();
        let manager =
            ModelManager::with_dir(dir.path().to_path_buf(), DEFAULT_MODEL_URL).unwrap();

        assert_eq!(
            manager.model_path(),
            dir.path().join(MODEL_FILENAME)
        );
        assert!(!manager.is_model_available());
    }

    #[test]
    fn test_undersized_file_is_not_available() {
        let dir = tempdir().unwrap();
        let manager =
            ModelManager::with_dir(dir.path().to_path_buf(), DEFAULT_MODEL_URL).unwrap();

        std::fs::write(manager.model_path(), b"not a real model").unwrap();
        assert!(!manager.is_model_available());
    }

    #[tokio::test]
    async fn test_offline_mode_fails_without_cache() {
        let dir = tempdir().unwrap();
        let manager = ModelManager::with_dir(dir.path().to_path_buf(), DEFAULT_MODEL_URL)
            .unwrap()
            .offline();

        let err = manager.ensure_model().await.unwrap_err();
        assert!(err.to_string().contains("Offline mode"));
    }

    #[test]
    fn test_manifest_roundtrip() {
        let dir = tempdir().unwrap();
        let manager =
            ModelManager::with_dir(dir.path().to_path_buf(), DEFAULT_MODEL_URL).unwrap();

        let manifest = ModelManifest {
            models: vec![ModelInfo {
                filename: MODEL_FILENAME.to_string(),
                url: DEFAULT_MODEL_URL.to_string(),
                size_bytes: 42,
                sha256: "abc".to_string(),
                downloaded_at: "0".to_string(),
            }],
        };

        manager.save_manifest(&manifest).unwrap();
        let loaded = manager.load_manifest().unwrap();
        assert_eq!(loaded.models.len(), 1);
        assert_eq!(loaded.models[0].size_bytes, 42);
    }
}
