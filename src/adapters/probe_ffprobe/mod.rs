//! FFprobe adapter for media duration discovery

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::adapters::locate_binary;
use crate::error::{TargetError, TargetResult};
use crate::ports::ProbePort;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    configured: Option<PathBuf>,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter, optionally pinned to a specific binary
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self { configured }
    }

    /// Arguments asking for the container duration only, without key or wrapper text
    fn duration_args(file_path: &str) -> [&str; 7] {
        [
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
            file_path,
        ]
    }
}

/// Parse ffprobe's single-token duration output, in seconds
pub fn parse_duration(stdout: &str) -> TargetResult<f64> {
    let token = stdout.trim();
    token
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .ok_or_else(|| TargetError::ProbeError {
            message: format!("unexpected duration output {:?}", token),
        })
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_duration(&self, file_path: &str) -> TargetResult<f64> {
        let binary = locate_binary("ffprobe", self.configured.as_deref())?;
        debug!(binary = %binary.display(), file = file_path, "Probing duration");

        let output = Command::new(&binary)
            .args(Self::duration_args(file_path))
            .output()
            .await?;

        if !output.status.success() {
            return Err(TargetError::ProbeError {
                message: format!(
                    "ffprobe exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        parse_duration(&String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("600.000000\n").unwrap(), 600.0);
        assert_eq!(parse_duration("  12.5 ").unwrap(), 12.5);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("N/A\n").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("inf").is_err());
    }

    #[test]
    fn test_duration_args_end_with_path() {
        let args = FFprobeAdapter::duration_args("movie.mkv");
        assert_eq!(args[3], "format=duration");
        assert_eq!(args[6], "movie.mkv");
    }

    #[tokio::test]
    async fn test_missing_binary_is_dependency_error() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = FFprobeAdapter::new(Some(dir.path().join("no-ffprobe")));
        let err = adapter.probe_duration("movie.mkv").await.unwrap_err();
        assert!(matches!(err, TargetError::DependencyMissing { .. }));
    }
}
