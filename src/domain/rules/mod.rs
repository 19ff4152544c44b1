// Domain rules - Request validation

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::bitrate::BYTES_PER_MIB;
use crate::domain::model::*;
use crate::error::{TargetError, TargetResult};
use crate::ports::EnvPort;
use crate::utils::path::is_output_path;

/// A named check over one field of an [`EncodeRequest`].
///
/// Rules run in [`ValidationRule::ORDER`] and the first failure aborts
/// validation. Only [`ValidationRule::ThreadCount`] touches the request, to
/// resolve automatic thread selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    InputExists,
    SizeBelowInput,
    OutputShape,
    AudioBitrate,
    ThreadCount,
    VideoLibrary,
    AudioLibrary,
}

impl ValidationRule {
    /// Evaluation order
    pub const ORDER: [ValidationRule; 7] = [
        ValidationRule::InputExists,
        ValidationRule::SizeBelowInput,
        ValidationRule::OutputShape,
        ValidationRule::AudioBitrate,
        ValidationRule::ThreadCount,
        ValidationRule::VideoLibrary,
        ValidationRule::AudioLibrary,
    ];

    /// Fixed failure reason
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationRule::InputExists => "Input file must be a valid path to an existing file",
            ValidationRule::SizeBelowInput => "File size must be less than the input's file size",
            ValidationRule::OutputShape => {
                "Output file must be a valid path and contain a file name with extension"
            }
            ValidationRule::AudioBitrate => "Audio bit-rate must be a positive number of kbit/s",
            ValidationRule::ThreadCount => {
                "Thread count must be 0 (automatic) or between 1 and the number of available cores"
            }
            ValidationRule::VideoLibrary => "Video library must not be empty",
            ValidationRule::AudioLibrary => "Audio library must not be empty",
        }
    }

    /// The raw value this rule inspects, as reported on failure
    fn offending_value(&self, request: &EncodeRequest) -> String {
        match self {
            ValidationRule::InputExists => request.input.clone(),
            ValidationRule::SizeBelowInput => request.target_size_mb.to_string(),
            ValidationRule::OutputShape => request.output.clone(),
            ValidationRule::AudioBitrate => request.audio_bitrate.to_string(),
            ValidationRule::ThreadCount => request.threads.to_string(),
            ValidationRule::VideoLibrary => format!("{:?}", request.video_lib),
            ValidationRule::AudioLibrary => format!("{:?}", request.audio_lib),
        }
    }

    /// Evaluate the rule, resolving automatic thread count in place
    fn check(&self, request: &mut EncodeRequest, env: &dyn EnvPort) -> bool {
        match self {
            ValidationRule::InputExists => Path::new(&request.input).is_file(),
            ValidationRule::SizeBelowInput => input_exceeds_target(request),
            ValidationRule::OutputShape => is_output_path(&request.output),
            ValidationRule::AudioBitrate => request.audio_bitrate > 0,
            ValidationRule::ThreadCount => resolve_threads(request, env.logical_cores()),
            ValidationRule::VideoLibrary => !request.video_lib.trim().is_empty(),
            ValidationRule::AudioLibrary => !request.audio_lib.trim().is_empty(),
        }
    }
}

/// Target size, in bytes, must be strictly below the input's current size
fn input_exceeds_target(request: &EncodeRequest) -> bool {
    let Ok(metadata) = fs::metadata(&request.input) else {
        return false;
    };
    let target_bytes = request.target_size_mb as u128 * BYTES_PER_MIB as u128;
    target_bytes < metadata.len() as u128
}

fn resolve_threads(request: &mut EncodeRequest, cores: usize) -> bool {
    let cores = cores.max(1);
    if request.threads == AUTO_THREADS {
        request.threads = i32::try_from(cores).unwrap_or(i32::MAX);
        debug!(threads = request.threads, "Resolved automatic thread count");
        return true;
    }
    request.threads >= 1 && (request.threads as usize) <= cores
}

/// Validate a request, stopping at the first failing rule.
///
/// On success `request.threads` is never 0.
pub fn validate(request: &mut EncodeRequest, env: &dyn EnvPort) -> TargetResult<()> {
    for rule in ValidationRule::ORDER {
        if !rule.check(request, env) {
            return Err(TargetError::invalid_input(
                rule.reason(),
                rule.offending_value(request),
            ));
        }
    }
    Ok(())
}
