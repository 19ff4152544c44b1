//! Error handling module for ffmpeg-target

use thiserror::Error;

/// Main error type for ffmpeg-target operations
#[derive(Error, Debug)]
pub enum TargetError {
    /// A validation rule rejected a user-supplied value
    #[error("{reason}: {value}")]
    InvalidInput { reason: &'static str, value: String },

    /// An external binary could not be located
    #[error("Required dependency not found: {binary}")]
    DependencyMissing { binary: String },

    /// The computed video bitrate leaves nothing for the video stream
    #[error(
        "Target size is too small: {total} kbit/s total minus {audio} kbit/s audio leaves a video bitrate of {bitrate} kbit/s"
    )]
    InconsistentBitrate { bitrate: i64, total: i64, audio: i64 },

    /// Media probe error
    #[error("Failed to probe media file: {message}")]
    ProbeError { message: String },

    /// An encoder pass exited unsuccessfully
    #[error("Encoding pass {pass} failed: {status}")]
    EncodeFailed { pass: u8, status: String },

    /// Configuration file error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TargetError {
    /// Build an invalid-input error from a rule reason and the offending value
    pub fn invalid_input(reason: &'static str, value: impl ToString) -> Self {
        TargetError::InvalidInput {
            reason,
            value: value.to_string(),
        }
    }

    /// Build a missing-dependency error for the named binary
    pub fn dependency_missing(binary: impl Into<String>) -> Self {
        TargetError::DependencyMissing {
            binary: binary.into(),
        }
    }
}

/// Result type alias for ffmpeg-target operations
pub type TargetResult<T> = std::result::Result<T, TargetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_combines_reason_and_value() {
        let err = TargetError::invalid_input("Audio bit-rate must be positive", -5);
        assert_eq!(err.to_string(), "Audio bit-rate must be positive: -5");
    }

    #[test]
    fn test_dependency_missing_names_binary() {
        let err = TargetError::dependency_missing("ffprobe");
        assert_eq!(err.to_string(), "Required dependency not found: ffprobe");
    }
}
