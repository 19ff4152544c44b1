//! ffmpeg-target library
//!
//! Derives a video bitrate from a target file size and media duration, and
//! renders the two-pass ffmpeg invocation that encodes to it.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod invocation;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::bitrate::calculate_bitrate;
pub use domain::model::{EncodeRequest, Preset, TimeSpec};
pub use domain::rules::validate;
pub use error::{TargetError, TargetResult};
pub use invocation::{Buildable, InputSegment, InvocationPlan, TwoPassBuilder};
