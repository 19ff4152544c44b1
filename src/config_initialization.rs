//! Configuration hierarchy: CLI flag > environment variable > config file > built-in default
//!
//! clap folds environment variables into the parsed arguments, so only two
//! layers meet here: the parsed arguments and the config file defaults.

use tracing::{debug, warn};

use crate::adapters::toml_config::EncodeDefaults;
use crate::cli::EncodeArgs;
use crate::domain::model::{EncodeRequest, AUTO_THREADS, MAX_THREADS};

/// Config files bypass the argument parser, so hold them to the same range
fn config_threads(threads: i32) -> i32 {
    let clamped = threads.clamp(AUTO_THREADS, MAX_THREADS);
    if clamped != threads {
        warn!(
            configured = threads,
            using = clamped,
            "Config thread count outside {}..={}, clamping",
            AUTO_THREADS,
            MAX_THREADS
        );
    }
    clamped
}

/// Merge parsed arguments over config defaults into an unvalidated request
pub fn build_request(args: &EncodeArgs, defaults: &EncodeDefaults) -> EncodeRequest {
    let request = EncodeRequest {
        input: args.input.clone(),
        target_size_mb: args.file_size,
        output: args.output.clone(),
        video_lib: args.lib.clone().unwrap_or_else(|| defaults.video_lib.clone()),
        audio_lib: args.alib.clone().unwrap_or_else(|| defaults.audio_lib.clone()),
        audio_bitrate: args.abr.unwrap_or(defaults.audio_bitrate),
        threads: args.threads.unwrap_or_else(|| config_threads(defaults.threads)),
        preset: args.preset.unwrap_or(defaults.preset),
        overwrite: args.yes || defaults.overwrite,
        seek: args.seek,
        duration_limit: args.duration,
    };
    debug!(?request, "Resolved encode request");
    request
}
