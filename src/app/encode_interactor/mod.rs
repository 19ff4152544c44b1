// Encode interactor - Orchestrates the size-targeted encode use case

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error, info};

use crate::domain::bitrate::{calculate_bitrate, ensure_positive};
use crate::domain::model::{EncodeRequest, TimeSpec};
use crate::domain::rules::validate;
use crate::error::{TargetError, TargetResult};
use crate::invocation::{InvocationPlan, TwoPassBuilder};
use crate::ports::*;
use crate::utils::Utils;

/// Everything derived for one request, ready to hand to the encoder
#[derive(Debug, Clone, Serialize)]
pub struct EncodePlan {
    /// The request after validation (threads resolved)
    pub request: EncodeRequest,
    /// Full container duration reported by the prober, in seconds
    pub media_duration: f64,
    /// Seconds of input that will actually be encoded
    pub encoded_duration: f64,
    /// Target video bitrate in kbit/s
    pub video_bitrate: i64,
    /// Rendered two-pass invocation
    pub invocation: InvocationPlan,
    /// Resolved encoder binary
    #[serde(skip)]
    pub encoder: PathBuf,
}

/// Result of a completed encode
#[derive(Debug, Clone)]
pub struct EncodeReport {
    pub output: String,
    pub video_bitrate: i64,
    pub elapsed: Duration,
}

fn describe_time(time: Option<TimeSpec>) -> String {
    time.map_or_else(|| "none".to_string(), |t| t.to_string())
}

/// Interactor for the size-targeted encode use case
pub struct EncodeInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    env_port: Arc<dyn EnvPort>,
}

impl EncodeInteractor {
    /// Create new encode interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        env_port: Arc<dyn EnvPort>,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            env_port,
        }
    }

    /// Validate the request and derive the invocation, without encoding anything
    pub async fn plan(&self, mut request: EncodeRequest) -> TargetResult<EncodePlan> {
        // Validate before touching any external tool
        validate(&mut request, self.env_port.as_ref())?;
        info!(
            input = %request.input,
            target_mb = request.target_size_mb,
            threads = request.threads,
            "Request validated"
        );

        let encoder = self.execute_port.encoder()?;

        let media_duration = self.probe_port.probe_duration(&request.input).await?;
        if media_duration <= 0.0 {
            return Err(TargetError::ProbeError {
                message: format!("non-positive duration {} for {}", media_duration, request.input),
            });
        }

        let encoded_duration = request.effective_duration(media_duration);
        if encoded_duration <= 0.0 {
            return Err(TargetError::ProbeError {
                message: format!(
                    "nothing left to encode from the {:.3}s input (seek {}, duration limit {})",
                    media_duration,
                    describe_time(request.seek),
                    describe_time(request.duration_limit)
                ),
            });
        }
        info!(
            duration = %Utils::format_duration(Duration::from_secs_f64(encoded_duration)),
            "Probed input"
        );

        let video_bitrate = ensure_positive(
            calculate_bitrate(request.target_size_mb, encoded_duration, request.audio_bitrate),
            request.target_size_mb,
            encoded_duration,
            request.audio_bitrate,
        )?;
        info!(
            video_kbps = video_bitrate,
            audio_kbps = request.audio_bitrate,
            "Computed target bitrate"
        );

        let invocation = TwoPassBuilder::new(&request, video_bitrate)
            .with_program(encoder.to_string_lossy())
            .build_plan();
        debug!(%invocation, "Rendered invocation");

        Ok(EncodePlan {
            request,
            media_duration,
            encoded_duration,
            video_bitrate,
            invocation,
            encoder,
        })
    }

    /// Run both passes of a plan; the second pass only runs if the first succeeds
    pub async fn run(&self, plan: &EncodePlan) -> TargetResult<EncodeReport> {
        let started = Instant::now();

        for (pass, args) in plan.invocation.passes() {
            info!(pass, "Starting encoding pass");
            let outcome = self.execute_port.run(&plan.encoder, args).await?;
            if !outcome.success {
                error!(pass, status = %outcome.describe(), "Encoding pass failed");
                return Err(TargetError::EncodeFailed {
                    pass,
                    status: outcome.describe(),
                });
            }
        }

        let elapsed = started.elapsed();
        info!(
            output = %plan.request.output,
            elapsed = %Utils::format_duration(elapsed),
            "Encode completed"
        );
        Ok(EncodeReport {
            output: plan.request.output.clone(),
            video_bitrate: plan.video_bitrate,
            elapsed,
        })
    }

    /// Plan and run in one go
    pub async fn execute(&self, request: EncodeRequest) -> TargetResult<EncodeReport> {
        let plan = self.plan(request).await?;
        self.run(&plan).await
    }

    /// Container duration of a media file
    pub async fn probe(&self, input: &str) -> TargetResult<f64> {
        self.probe_port.probe_duration(input).await
    }
}
