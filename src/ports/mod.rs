// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::TargetResult;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Container duration of the media file, in seconds
    async fn probe_duration(&self, file_path: &str) -> TargetResult<f64>;
}

/// Outcome of one external encoder run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    pub success: bool,
    pub exit_code: Option<i32>,
}

impl PassOutcome {
    /// Human-readable exit status
    pub fn describe(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Port for running the external encoder
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Resolve the encoder binary, failing when it is not installed
    fn encoder(&self) -> TargetResult<PathBuf>;

    /// Run the encoder once with an explicit argument vector and wait for it
    async fn run(&self, program: &Path, args: &[String]) -> TargetResult<PassOutcome>;
}

/// Port for host environment queries
pub trait EnvPort: Send + Sync {
    /// Number of logical cores available to the encoder
    fn logical_cores(&self) -> usize;
}
