//! Command-line argument definitions

use clap::Args;
use clap_num::number_range;

use crate::domain::model::{Preset, TimeSpec, MAX_THREADS};

fn thread_count(s: &str) -> Result<i32, String> {
    number_range(s, 0, MAX_THREADS)
}

fn time_spec(s: &str) -> Result<TimeSpec, String> {
    TimeSpec::parse(s).map_err(|e| e.to_string())
}

/// Arguments describing one size-targeted encode
#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    /// Path to the input media file to be re-encoded
    pub input: String,

    /// Output file size target, in mega-bytes (MiB)
    pub file_size: u64,

    /// Path of the re-encoded file, including extension
    pub output: String,

    /// ffmpeg library used for video encoding [default: libx264]
    #[arg(short = 'l', long = "lib", env = "FFMPEG_TARGET_VLIB")]
    pub lib: Option<String>,

    /// ffmpeg library used for audio encoding [default: aac]
    #[arg(short = 'a', long = "alib", env = "FFMPEG_TARGET_ALIB")]
    pub alib: Option<String>,

    /// Average audio bitrate, in kilobits per second [default: 128]
    #[arg(
        short = 'b',
        long = "abr",
        env = "FFMPEG_TARGET_ABR",
        allow_negative_numbers = true
    )]
    pub abr: Option<i64>,

    /// Encoder threads, 0 to use every logical core [default: 0]
    #[arg(short = 't', long, env = "FFMPEG_TARGET_THREADS", value_parser = thread_count)]
    pub threads: Option<i32>,

    /// Pass -y to ffmpeg, confirming output overwrite
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Encoder speed preset [default: medium]
    #[arg(short = 'p', long, value_enum, env = "FFMPEG_TARGET_PRESET")]
    pub preset: Option<Preset>,

    /// Seek into the input before encoding (seconds, MM:SS.ms or HH:MM:SS.ms)
    #[arg(long, value_parser = time_spec)]
    pub seek: Option<TimeSpec>,

    /// Encode at most this much of the input (seconds, MM:SS.ms or HH:MM:SS.ms)
    #[arg(long, value_parser = time_spec)]
    pub duration: Option<TimeSpec>,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub encode: EncodeArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Media file to probe
    pub input: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
