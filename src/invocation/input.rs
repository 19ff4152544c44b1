//! Input clause builder (`[options] -i <path>`)

use crate::domain::model::TimeSpec;
use crate::invocation::Buildable;

const INPUT: &str = "-i";

/// Options that apply to a single encoder input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFlag {
    Offset,
    Duration,
    Seek,
    Loop,
}

impl InputFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFlag::Offset => "-itsoffset",
            InputFlag::Duration => "-t",
            InputFlag::Seek => "-ss",
            InputFlag::Loop => "-stream_loop",
        }
    }
}

/// One input clause: the flags currently set, in insertion order, then the media path.
///
/// Re-setting a flag updates its value in place. Clearing a flag that is not
/// set does nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSegment {
    path: String,
    params: Vec<(InputFlag, String)>,
}

impl InputSegment {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Value of a flag if set; boolean flags carry an empty value
    pub fn get(&self, flag: InputFlag) -> Option<&str> {
        self.params
            .iter()
            .find(|(f, _)| *f == flag)
            .map(|(_, v)| v.as_str())
    }

    /// Shift input timestamps by `t` seconds (may be negative), or `None` to disable
    pub fn offset(&mut self, t: Option<f64>) -> &mut Self {
        self.set_or_clear(InputFlag::Offset, t.map(|t| t.to_string()))
    }

    /// Read at most `t` of the input, or `None` to disable
    pub fn duration(&mut self, t: Option<TimeSpec>) -> &mut Self {
        self.set_or_clear(InputFlag::Duration, t.map(|t| t.to_arg()))
    }

    /// Seek to `t` before reading, or `None` to disable
    pub fn seek(&mut self, t: Option<TimeSpec>) -> &mut Self {
        self.set_or_clear(InputFlag::Seek, t.map(|t| t.to_arg()))
    }

    /// Loop the input when `toggle` is true
    pub fn stream_loop(&mut self, toggle: bool) -> &mut Self {
        self.set_or_clear(InputFlag::Loop, toggle.then(String::new))
    }

    fn set_or_clear(&mut self, flag: InputFlag, value: Option<String>) -> &mut Self {
        match value {
            Some(value) => match self.params.iter_mut().find(|(f, _)| *f == flag) {
                Some(entry) => entry.1 = value,
                None => self.params.push((flag, value)),
            },
            None => self.params.retain(|(f, _)| *f != flag),
        }
        self
    }

    /// Argument vector for this clause; empty values are not emitted
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.params.len() * 2 + 2);
        for (flag, value) in &self.params {
            args.push(flag.as_str().to_string());
            if !value.is_empty() {
                args.push(value.clone());
            }
        }
        args.push(INPUT.to_string());
        args.push(self.path.clone());
        args
    }
}

impl Buildable for InputSegment {
    fn build(&self) -> String {
        self.to_args().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PATH: &str = "C:/users/admin/desktop/input.mp4";

    #[test]
    fn test_bare_input() {
        let segment = InputSegment::new(TEST_PATH);
        assert_eq!(segment.build(), format!("-i {}", TEST_PATH));
    }

    #[test]
    fn test_seek() {
        let mut segment = InputSegment::new(TEST_PATH);
        segment.seek(Some(TimeSpec::from_seconds(5.0)));
        assert_eq!(segment.build(), format!("-ss 5 -i {}", TEST_PATH));
    }

    #[test]
    fn test_loop_then_offset_keeps_insertion_order() {
        let mut segment = InputSegment::new(TEST_PATH);
        segment.stream_loop(true).offset(Some(10.2));
        assert_eq!(
            segment.build(),
            format!("-stream_loop -itsoffset 10.2 -i {}", TEST_PATH)
        );
        assert_eq!(segment.get(InputFlag::Loop), Some(""));
    }

    #[test]
    fn test_reset_updates_in_place() {
        let mut segment = InputSegment::new(TEST_PATH);
        segment
            .seek(Some(TimeSpec::from_seconds(5.0)))
            .duration(Some(TimeSpec::from_seconds(30.0)))
            .seek(Some(TimeSpec::from_seconds(7.5)));
        assert_eq!(
            segment.to_args(),
            vec!["-ss", "7.5", "-t", "30", "-i", TEST_PATH]
        );
    }

    #[test]
    fn test_redundant_clears_are_idempotent() {
        let untouched = InputSegment::new(TEST_PATH);

        let mut segment = InputSegment::new(TEST_PATH);
        segment
            .offset(Some(-1.5))
            .offset(None)
            .offset(None)
            .stream_loop(true)
            .stream_loop(false)
            .stream_loop(false)
            .duration(None)
            .seek(None);

        assert_eq!(segment.build(), untouched.build());
        assert_eq!(segment, untouched);
    }

    #[test]
    fn test_clear_keeps_other_flags_in_order() {
        let mut segment = InputSegment::new(TEST_PATH);
        segment
            .seek(Some(TimeSpec::from_seconds(1.0)))
            .offset(Some(2.0))
            .duration(Some(TimeSpec::from_seconds(3.0)))
            .offset(None);
        assert_eq!(segment.build(), format!("-ss 1 -t 3 -i {}", TEST_PATH));
    }
}
