// TOML config adapter - Defaults and tool paths from a TOML file

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::model::*;
use crate::error::{TargetError, TargetResult};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "FFMPEG_TARGET_CONFIG";

/// Contents of a config file. Missing keys fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub defaults: EncodeDefaults,
    pub tools: ToolPaths,
}

/// Fallback encode settings used when neither a flag nor an env var is given
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeDefaults {
    pub video_lib: String,
    pub audio_lib: String,
    pub audio_bitrate: i64,
    pub threads: i32,
    pub preset: Preset,
    pub overwrite: bool,
}

impl Default for EncodeDefaults {
    fn default() -> Self {
        Self {
            video_lib: DEFAULT_VIDEO_LIB.to_string(),
            audio_lib: DEFAULT_AUDIO_LIB.to_string(),
            audio_bitrate: DEFAULT_AUDIO_BITRATE,
            threads: AUTO_THREADS,
            preset: Preset::default(),
            overwrite: false,
        }
    }
}

/// Explicit locations of the external binaries
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPaths {
    pub ffmpeg: Option<PathBuf>,
    pub ffprobe: Option<PathBuf>,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Get default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(PathBuf::from(appdata).join("ffmpeg-target").join("config.toml"));
        }
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join("ffmpeg-target").join("config.toml"));
        }
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("ffmpeg-target")
                .join("config.toml")
        })
    }

    /// Parse config from a TOML string
    pub fn parse(toml_content: &str) -> TargetResult<AppConfig> {
        toml::from_str(toml_content).map_err(|e| TargetError::ConfigError {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    /// Load a specific config file; a missing file is an error
    pub fn load(path: &Path) -> TargetResult<AppConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| TargetError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        let config = Self::parse(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the explicitly named file, else `$FFMPEG_TARGET_CONFIG`, else the
    /// default location if it exists, else built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> TargetResult<AppConfig> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }
        match Self::default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No config file found, using built-in defaults");
                Ok(AppConfig::default())
            }
        }
    }
}
