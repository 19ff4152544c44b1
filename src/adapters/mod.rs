// Adapters - External system implementations

use std::path::{Path, PathBuf};

use crate::error::{TargetError, TargetResult};

pub mod env_host;
pub mod exec_ffmpeg;
pub mod probe_ffprobe;
pub mod toml_config;

// Re-export adapters
pub use env_host::HostEnvAdapter;
pub use exec_ffmpeg::FFmpegAdapter;
pub use probe_ffprobe::FFprobeAdapter;
pub use toml_config::TomlConfigAdapter;

/// Resolve an external tool, preferring a configured path over a PATH lookup
pub fn locate_binary(name: &str, configured: Option<&Path>) -> TargetResult<PathBuf> {
    if let Some(path) = configured {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(TargetError::dependency_missing(path.display().to_string()));
    }
    which::which(name).map_err(|_| TargetError::dependency_missing(name))
}
