//! CLI module for ffmpeg-target
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::logging::LogFormat;

pub mod args;
pub mod commands;

pub use args::{EncodeArgs, PlanArgs, ProbeArgs};

/// ffmpeg-target
///
/// Shorthand for a two-pass ffmpeg encode that targets an approximate file size.
#[derive(Parser, Debug)]
#[command(name = "ffmpeg-target")]
#[command(about = "Two-pass ffmpeg encoding to an approximate output file size")]
#[command(
    after_help = "Ideal for uploaded media which must meet tight file size constraints."
)]
#[command(version)]
pub struct Cli {
    /// Logging level (RUST_LOG overrides)
    #[arg(long, default_value = "info", global = true, env = "FFMPEG_TARGET_LOG")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    /// Configuration file (defaults and tool paths)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode the input to roughly the target size
    Encode(EncodeArgs),
    /// Print the encoder invocation without running it
    Plan(PlanArgs),
    /// Print the duration of a media file
    Probe(ProbeArgs),
}
