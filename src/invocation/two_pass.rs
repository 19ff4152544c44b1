//! Two-pass average-bitrate encode
//!
//! Pass 1 analyses the input into the stats file and discards its output;
//! pass 2 reads the stats to hit the target bitrate and writes the file.

use std::fmt;

use serde::Serialize;

use crate::domain::model::EncodeRequest;
use crate::invocation::{Buildable, InputSegment};
use crate::utils::path::null_sink;

/// Encoder binary used when no resolved path is supplied
pub const DEFAULT_ENCODER: &str = "ffmpeg";

/// Both passes of a two-pass encode, as explicit argument vectors.
///
/// The second pass must only run after the first one succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationPlan {
    pub program: String,
    pub first_pass: Vec<String>,
    pub second_pass: Vec<String>,
}

impl InvocationPlan {
    /// Passes in execution order, numbered from 1
    pub fn passes(&self) -> [(u8, &[String]); 2] {
        [
            (1, self.first_pass.as_slice()),
            (2, self.second_pass.as_slice()),
        ]
    }

    /// Paths (the value after `-i`, and the output file when present) are quoted
    fn write_pass(
        &self,
        f: &mut fmt::Formatter<'_>,
        args: &[String],
        ends_with_output: bool,
    ) -> fmt::Result {
        f.write_str(&self.program)?;
        let last = args.len().saturating_sub(1);
        for (i, arg) in args.iter().enumerate() {
            let is_input = i > 0 && args[i - 1] == "-i";
            let is_output = ends_with_output && i == last;
            if is_input || is_output {
                write!(f, " \"{}\"", arg.replace('"', "\\\""))?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Shell-style rendering, for display only; execution uses the argument vectors
impl fmt::Display for InvocationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_pass(f, &self.first_pass, false)?;
        f.write_str(" && ")?;
        self.write_pass(f, &self.second_pass, true)
    }
}

/// Renders a validated [`EncodeRequest`] and video bitrate into an [`InvocationPlan`]
pub struct TwoPassBuilder<'a> {
    request: &'a EncodeRequest,
    video_bitrate: i64,
    program: String,
}

impl<'a> TwoPassBuilder<'a> {
    pub fn new(request: &'a EncodeRequest, video_bitrate: i64) -> Self {
        Self {
            request,
            video_bitrate,
            program: DEFAULT_ENCODER.to_string(),
        }
    }

    /// Use a specific encoder binary
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn input_segment(&self) -> InputSegment {
        let mut segment = InputSegment::new(self.request.input.clone());
        segment
            .seek(self.request.seek)
            .duration(self.request.duration_limit);
        segment
    }

    /// `[-threads T] [-y] <input> -c:v <lib> -b:v <B>k -pass <n>`
    fn common_args(&self, pass: u8) -> Vec<String> {
        let mut args = Vec::new();
        // A single thread is the encoder's own choice to make
        if self.request.threads > 1 {
            args.extend(["-threads".to_string(), self.request.threads.to_string()]);
        }
        if self.request.overwrite {
            args.push("-y".to_string());
        }
        args.extend(self.input_segment().to_args());
        args.extend([
            "-c:v".to_string(),
            self.request.video_lib.clone(),
            "-b:v".to_string(),
            format!("{}k", self.video_bitrate),
            "-pass".to_string(),
            pass.to_string(),
        ]);
        args
    }

    fn preset_args(&self) -> [String; 2] {
        ["-preset".to_string(), self.request.preset.as_str().to_string()]
    }

    /// Analysis pass: constant frame rate, no audio, output discarded
    pub fn first_pass_args(&self) -> Vec<String> {
        let mut args = self.common_args(1);
        args.extend(["-vsync".to_string(), "cfr".to_string(), "-an".to_string()]);
        args.extend(self.preset_args());
        args.extend(["-f".to_string(), "null".to_string(), null_sink().to_string()]);
        args
    }

    /// Final pass: audio encoded, written to the output file
    pub fn second_pass_args(&self) -> Vec<String> {
        let mut args = self.common_args(2);
        args.extend([
            "-c:a".to_string(),
            self.request.audio_lib.clone(),
            "-b:a".to_string(),
            format!("{}k", self.request.audio_bitrate),
        ]);
        args.extend(self.preset_args());
        args.push(self.request.output.clone());
        args
    }

    pub fn build_plan(&self) -> InvocationPlan {
        InvocationPlan {
            program: self.program.clone(),
            first_pass: self.first_pass_args(),
            second_pass: self.second_pass_args(),
        }
    }
}

impl Buildable for TwoPassBuilder<'_> {
    fn build(&self) -> String {
        self.build_plan().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Preset, TimeSpec};

    fn create_test_request(threads: i32, overwrite: bool) -> EncodeRequest {
        let mut request = EncodeRequest::new("in.mkv", 200, "out/clip.mp4");
        request.threads = threads;
        request.overwrite = overwrite;
        request
    }

    #[test]
    fn test_full_rendering() {
        let request = create_test_request(8, true);
        let rendered = TwoPassBuilder::new(&request, 2668).build();
        let sink = null_sink();
        assert_eq!(
            rendered,
            format!(
                "ffmpeg -threads 8 -y -i \"in.mkv\" -c:v libx264 -b:v 2668k -pass 1 \
                 -vsync cfr -an -preset medium -f null {sink} && \
                 ffmpeg -threads 8 -y -i \"in.mkv\" -c:v libx264 -b:v 2668k -pass 2 \
                 -c:a aac -b:a 128k -preset medium \"out/clip.mp4\""
            )
        );
    }

    #[test]
    fn test_single_thread_omits_thread_flag() {
        let request = create_test_request(1, false);
        let plan = TwoPassBuilder::new(&request, 2668).build_plan();
        assert!(!plan.first_pass.contains(&"-threads".to_string()));
        assert!(!plan.second_pass.contains(&"-threads".to_string()));
        assert!(plan.to_string().starts_with("ffmpeg -i \"in.mkv\""));
    }

    #[test]
    fn test_overwrite_flag_once_per_pass() {
        let unset = TwoPassBuilder::new(&create_test_request(4, false), 1000).build();
        assert!(!unset.contains("-y"));

        let set = TwoPassBuilder::new(&create_test_request(4, true), 1000).build();
        assert_eq!(set.matches(" -y ").count(), 2);
    }

    #[test]
    fn test_audio_only_in_second_pass() {
        let request = create_test_request(4, false);
        let builder = TwoPassBuilder::new(&request, 1000);
        let first = builder.first_pass_args();
        let second = builder.second_pass_args();

        assert!(!first.contains(&"-c:a".to_string()));
        assert!(first.contains(&"-an".to_string()));
        assert!(second.contains(&"-c:a".to_string()));
        assert!(second.contains(&"128k".to_string()));
        assert_eq!(second.last().unwrap(), "out/clip.mp4");
    }

    #[test]
    fn test_video_settings_identical_in_both_passes() {
        let mut request = create_test_request(4, false);
        request.video_lib = "libx265".to_string();
        request.preset = Preset::Veryslow;
        let builder = TwoPassBuilder::new(&request, 750);

        for args in [builder.first_pass_args(), builder.second_pass_args()] {
            let position = |flag: &str| args.iter().position(|a| a == flag).unwrap();
            assert_eq!(args[position("-c:v") + 1], "libx265");
            assert_eq!(args[position("-b:v") + 1], "750k");
            assert_eq!(args[position("-preset") + 1], "veryslow");
        }
    }

    #[test]
    fn test_pass_numbers_and_order() {
        let request = create_test_request(2, false);
        let plan = TwoPassBuilder::new(&request, 500)
            .with_program("/usr/bin/ffmpeg")
            .build_plan();
        let passes = plan.passes();

        assert_eq!(passes[0].0, 1);
        assert_eq!(passes[1].0, 2);
        let pass_value = |args: &[String]| {
            let index = args.iter().position(|a| a == "-pass").unwrap();
            args[index + 1].clone()
        };
        assert_eq!(pass_value(passes[0].1), "1");
        assert_eq!(pass_value(passes[1].1), "2");
        assert!(plan.to_string().starts_with("/usr/bin/ffmpeg -threads 2 -i"));
    }

    #[test]
    fn test_input_options_precede_input() {
        let mut request = create_test_request(1, false);
        request.seek = Some(TimeSpec::from_seconds(30.0));
        request.duration_limit = Some(TimeSpec::from_seconds(90.0));
        let plan = TwoPassBuilder::new(&request, 500).build_plan();

        assert_eq!(
            &plan.second_pass[..6],
            &["-ss", "30", "-t", "90", "-i", "in.mkv"]
        );
    }

    #[test]
    fn test_plan_serializes_argument_vectors() {
        let request = create_test_request(1, false);
        let plan = TwoPassBuilder::new(&request, 500).build_plan();
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["program"], "ffmpeg");
        assert_eq!(json["first_pass"][0], "-i");
        assert!(json.get("quoted").is_none());
    }

    #[test]
    fn test_quoting_follows_argument_position() {
        // An input named like a codec must not quote the codec argument
        let mut request = EncodeRequest::new("aac", 200, "out/say \"hi\".mp4");
        request.threads = 1;
        let rendered = TwoPassBuilder::new(&request, 500).build();

        assert!(rendered.contains("-i \"aac\" -c:v"));
        assert!(rendered.contains("-c:a aac -b:a"));
        assert!(rendered.ends_with(r#" "out/say \"hi\".mp4""#));
        assert!(rendered.contains("-f null "));
    }
}
