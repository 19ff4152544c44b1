// Domain models - Core types and data structures

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{TargetError, TargetResult};

/// Default video encoder library
pub const DEFAULT_VIDEO_LIB: &str = "libx264";
/// Default audio encoder library
pub const DEFAULT_AUDIO_LIB: &str = "aac";
/// Default audio bitrate in kbit/s
pub const DEFAULT_AUDIO_BITRATE: i64 = 128;
/// Thread count meaning "use every logical core"
pub const AUTO_THREADS: i32 = 0;
/// Highest accepted thread count
pub const MAX_THREADS: i32 = 63;

/// Time specification with precision - represents time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Parse time string: seconds, MM:SS.ms or HH:MM:SS.ms
    pub fn parse(time_str: &str) -> TargetResult<Self> {
        const REASON: &str =
            "Time must be seconds (123.45), MM:SS.ms (2:30.5) or HH:MM:SS.ms (1:02:30.5)";
        let trimmed = time_str.trim();
        let invalid = || TargetError::invalid_input(REASON, time_str);

        if let Ok(seconds) = trimmed.parse::<f64>() {
            if seconds < 0.0 || !seconds.is_finite() {
                return Err(invalid());
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        let (hours, minutes, seconds_part) = match parts.as_slice() {
            [m, s] => (0, m.parse::<u32>().map_err(|_| invalid())?, *s),
            [h, m, s] => (
                h.parse::<u32>().map_err(|_| invalid())?,
                m.parse::<u32>().map_err(|_| invalid())?,
                *s,
            ),
            _ => return Err(invalid()),
        };
        let seconds = seconds_part.parse::<f64>().map_err(|_| invalid())?;

        if parts.len() == 3 && minutes >= 60 {
            return Err(invalid());
        }
        if !(0.0..60.0).contains(&seconds) {
            return Err(invalid());
        }

        Ok(Self::from_seconds(
            hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
        ))
    }

    /// Render as a plain seconds value, the form ffmpeg accepts for `-ss` and `-t`
    pub fn to_arg(&self) -> String {
        self.seconds.to_string()
    }

    /// Format as HH:MM:SS.ms, or MM:SS.ms under an hour
    pub fn format_hms(&self) -> String {
        let total_ms = (self.seconds * 1000.0).round() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = total_ms / 60_000 % 60;
        let seconds = total_ms / 1000 % 60;
        let milliseconds = total_ms % 1000;

        if hours > 0 {
            format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
        } else {
            format!("{}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

/// Encoder speed preset, slowest/highest quality last
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Ultrafast,
    Superfast,
    Veryfast,
    Faster,
    Fast,
    #[default]
    Medium,
    Slow,
    Slower,
    Veryslow,
    Placebo,
}

impl Preset {
    /// Name as understood by the encoder's `-preset` option
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Ultrafast => "ultrafast",
            Preset::Superfast => "superfast",
            Preset::Veryfast => "veryfast",
            Preset::Faster => "faster",
            Preset::Fast => "fast",
            Preset::Medium => "medium",
            Preset::Slow => "slow",
            Preset::Slower => "slower",
            Preset::Veryslow => "veryslow",
            Preset::Placebo => "placebo",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One encode job as supplied by the user.
///
/// Validation may rewrite `threads` from [`AUTO_THREADS`] to the host core
/// count; every other field is read-only once the request is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodeRequest {
    /// Input media file
    pub input: String,
    /// Target size of the whole output file, in MiB
    pub target_size_mb: u64,
    /// Output media file, including extension
    pub output: String,
    /// Video encoder library (`-c:v`)
    pub video_lib: String,
    /// Audio encoder library (`-c:a`)
    pub audio_lib: String,
    /// Audio bitrate in kbit/s
    pub audio_bitrate: i64,
    /// Encoder worker threads, 0 for automatic
    pub threads: i32,
    /// Encoder speed preset
    pub preset: Preset,
    /// Pass `-y` to the encoder
    pub overwrite: bool,
    /// Seek into the input before encoding
    pub seek: Option<TimeSpec>,
    /// Limit how much of the input is read
    pub duration_limit: Option<TimeSpec>,
}

impl EncodeRequest {
    /// Create a request with default codecs, bitrate, threads and preset
    pub fn new(input: impl Into<String>, target_size_mb: u64, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            target_size_mb,
            output: output.into(),
            video_lib: DEFAULT_VIDEO_LIB.to_string(),
            audio_lib: DEFAULT_AUDIO_LIB.to_string(),
            audio_bitrate: DEFAULT_AUDIO_BITRATE,
            threads: AUTO_THREADS,
            preset: Preset::default(),
            overwrite: false,
            seek: None,
            duration_limit: None,
        }
    }

    /// Length of input actually encoded, given the full media duration
    pub fn effective_duration(&self, media_duration: f64) -> f64 {
        let seek = self.seek.map(|s| s.seconds).unwrap_or(0.0);
        let remaining = media_duration - seek;
        match self.duration_limit {
            Some(limit) => remaining.min(limit.seconds),
            None => remaining,
        }
    }
}
