//! FFmpeg execution adapter
//!
//! Runs the encoder directly from an argument vector; no shell is involved.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::adapters::locate_binary;
use crate::error::TargetResult;
use crate::ports::{ExecutePort, PassOutcome};

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    configured: Option<PathBuf>,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter, optionally pinned to a specific binary
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self { configured }
    }
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    fn encoder(&self) -> TargetResult<PathBuf> {
        locate_binary("ffmpeg", self.configured.as_deref())
    }

    async fn run(&self, program: &Path, args: &[String]) -> TargetResult<PassOutcome> {
        debug!(program = %program.display(), ?args, "Spawning encoder");

        // Encoder progress goes straight to the user's terminal
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .status()
            .await?;

        Ok(PassOutcome {
            success: status.success(),
            exit_code: status.code(),
        })
    }
}
