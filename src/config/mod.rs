//! Application Configuration
//!
//! User settings stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::engine::models::DEFAULT_MODEL_URL;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Drawing surface settings
    pub canvas: CanvasSettings,
    /// Recognition settings
    pub recognition: RecognitionSettings,
}

/// Drawing surface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasSettings {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Brush diameter in pixels
    pub stroke_width: u32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            stroke_width: 8,
        }
    }
}

/// Recognition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionSettings {
    /// Download URL for the classifier model
    pub model_url: String,
    /// Number of ranked candidates to return
    pub top_k: usize,
    /// Never touch the network; require a cached model
    pub offline: bool,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            model_url: DEFAULT_MODEL_URL.to_string(),
            top_k: 5,
            offline: false,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        assert_eq!(config.canvas.width, 400);
        assert_eq!(config.canvas.height, 400);
        assert_eq!(config.canvas.stroke_width, 8);

        assert_eq!(config.recognition.model_url, DEFAULT_MODEL_URL);
        assert_eq!(config.recognition.top_k, 5);
        assert!(!config.recognition.offline);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig::default();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.canvas.width, parsed.canvas.width);
        assert_eq!(config.recognition.top_k, parsed.recognition.top_k);
        assert_eq!(config.recognition.model_url, parsed.recognition.model_url);
    }

    #[test]
    fn test_config_with_custom_values() {
        let mut config = AppConfig::default();
        config.canvas.stroke_width = 12;
        config.recognition.top_k = 10;
        config.recognition.offline = true;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.canvas.stroke_width, 12);
        assert_eq!(parsed.recognition.top_k, 10);
        assert!(parsed.recognition.offline);
    }

    #[test]
    fn test_save_and_load_config() {
        let config = AppConfig::default();
        let temp_file = NamedTempFile::new().unwrap();

        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(config.canvas.width, loaded.canvas.width);
        assert_eq!(config.recognition.model_url, loaded.recognition.model_url);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
