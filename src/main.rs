//! ffmpeg-target
//!
//! Shorthand for a two-pass ffmpeg encode that lands near a target file size.
//!
//! # Usage
//!
//! ```bash
//! ffmpeg-target encode input.mkv 200 out/clip.mp4 --preset slow -y
//! ffmpeg-target plan input.mkv 200 out/clip.mp4 --json
//! ffmpeg-target probe input.mkv
//! ```

use anyhow::Result;
use clap::Parser;

use ffmpeg_target::cli::{self, Cli};
use ffmpeg_target::utils::logging::{LogLevel, LoggingConfig, LoggingSystem};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    let logging = LoggingSystem::new(LoggingConfig {
        level: LogLevel::parse(&cli.log_level)?,
        format: cli.log_format,
        target: false,
    });
    logging.initialize()?;
    logging.log_system_info();

    cli::commands::run(cli).await
}
