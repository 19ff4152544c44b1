//! Target bitrate derivation
//!
//! A size in MiB converts to kilobits with `1024 * 1024 * 8 / 1000`; a
//! kilobit is always 1000 bits, so the factor is 8388.608 rather than 8192.
//! 200 MiB over 600 s gives 2796 kbit/s in total, and with 128 kbit/s of
//! audio the video stream is left with 2668 kbit/s.

use crate::error::{TargetError, TargetResult};

/// Bytes in one binary mega-byte
pub const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Kilobits in one binary mega-byte
pub const KBIT_PER_MIB: f64 = (BYTES_PER_MIB * 8) as f64 / 1000.0;

/// Average bitrate of the whole file in kbit/s, truncated toward zero
pub fn total_bitrate(size_mb: u64, duration: f64) -> i64 {
    (size_mb as f64 * KBIT_PER_MIB / duration) as i64
}

/// Video bitrate in kbit/s that makes a `size_mb` file last `duration` seconds
/// with `audio_bitrate` kbit/s of audio.
///
/// No guarding: a zero duration or an oversized audio bitrate yields a
/// meaningless or non-positive value. See [`ensure_positive`].
pub fn calculate_bitrate(size_mb: u64, duration: f64, audio_bitrate: i64) -> i64 {
    total_bitrate(size_mb, duration).saturating_sub(audio_bitrate)
}

/// Reject a video bitrate that leaves nothing for the video stream
pub fn ensure_positive(
    video_bitrate: i64,
    size_mb: u64,
    duration: f64,
    audio_bitrate: i64,
) -> TargetResult<i64> {
    if video_bitrate > 0 {
        return Ok(video_bitrate);
    }
    Err(TargetError::InconsistentBitrate {
        bitrate: video_bitrate,
        total: total_bitrate(size_mb, duration),
        audio: audio_bitrate,
    })
}
