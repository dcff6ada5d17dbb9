// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[server]` - Generation server base URL and request timeout
//! - `[generation]` - Request shape, caption strategy, and prompt-shape defaults
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Pass `--config-dir` on the command line
//! 3. Set the `EASEL_CONFIG_DIR` environment variable
//! 4. Falls back to the platform-specific config directory

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Which body shape `POST /gerar` receives. The two shapes correspond to the
/// two deployments of the service; exactly one is active at a time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RequestShape {
    /// Multipart form: technical sheet, font, brand colors, optional files.
    #[default]
    TechnicalSheet,
    /// JSON body: free-form prompt, image count, aspect ratio.
    Prompt,
}

impl RequestShape {
    /// All shapes, in the order shown by the settings picker.
    pub const ALL: [RequestShape; 2] = [RequestShape::TechnicalSheet, RequestShape::Prompt];
}

impl std::fmt::Display for RequestShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestShape::TechnicalSheet => write!(f, "Technical sheet"),
            RequestShape::Prompt => write!(f, "Prompt"),
        }
    }
}

/// What captions the rendered result cards carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionSource {
    /// The image's `tipo`/`descricao` fields, humanized.
    #[default]
    TypeDescription,
    /// The originating prompt echoed by the server.
    Prompt,
}

impl CaptionSource {
    /// All strategies, in the order shown by the settings picker.
    pub const ALL: [CaptionSource; 2] = [CaptionSource::TypeDescription, CaptionSource::Prompt];
}

impl std::fmt::Display for CaptionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptionSource::TypeDescription => write!(f, "Type and description"),
            CaptionSource::Prompt => write!(f, "Originating prompt"),
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "pt-BR").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Generation server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ServerConfig {
    /// Base URL of the generation service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ServerConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

/// Generation request settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GenerationConfig {
    /// Active request shape.
    #[serde(default)]
    pub request_shape: RequestShape,

    /// Caption strategy for rendered result cards.
    #[serde(default)]
    pub caption_source: CaptionSource,

    /// Whether the technical-sheet shape requires a product image upload.
    #[serde(default)]
    pub require_product_image: bool,

    /// Default image count for the prompt shape (1-4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_count: Option<u8>,

    /// Default aspect ratio for the prompt shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

impl GenerationConfig {
    pub fn image_count(&self) -> u8 {
        self.image_count
            .unwrap_or(DEFAULT_IMAGE_COUNT)
            .clamp(1, MAX_IMAGE_COUNT)
    }

    pub fn aspect_ratio(&self) -> &str {
        self.aspect_ratio.as_deref().unwrap_or(DEFAULT_ASPECT_RATIO)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default location.
///
/// Returns a tuple of (config, optional warning key). A missing file is not
/// a warning; an unreadable or unparseable file falls back to defaults with
/// a warning key for the notification system.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "failed to load config");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Saves the configuration to the default location.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = config_path_with_override(None) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_sections() {
        let config = Config {
            general: GeneralConfig {
                language: Some("pt-BR".to_string()),
                theme_mode: ThemeMode::Dark,
            },
            server: ServerConfig {
                base_url: Some("http://imagens.example:8080".to_string()),
                timeout_secs: Some(60),
            },
            generation: GenerationConfig {
                request_shape: RequestShape::Prompt,
                caption_source: CaptionSource::Prompt,
                require_product_image: true,
                image_count: Some(3),
                aspect_ratio: Some("16:9".to_string()),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "missing file should not warn");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_warns() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "not [valid toml").expect("failed to write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(
            warning.as_deref(),
            Some("notification-config-load-error")
        );
    }

    #[test]
    fn server_accessors_fall_back_to_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.base_url(), DEFAULT_BASE_URL);
        assert_eq!(server.timeout_secs(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn image_count_is_clamped_to_service_bound() {
        let generation = GenerationConfig {
            image_count: Some(9),
            ..GenerationConfig::default()
        };
        assert_eq!(generation.image_count(), MAX_IMAGE_COUNT);
    }

    #[test]
    fn request_shape_serializes_kebab_case() {
        let config = Config {
            generation: GenerationConfig {
                request_shape: RequestShape::TechnicalSheet,
                ..GenerationConfig::default()
            },
            ..Config::default()
        };
        let toml_text = toml::to_string_pretty(&config).expect("serializes");
        assert!(toml_text.contains("technical-sheet"));
    }
}
