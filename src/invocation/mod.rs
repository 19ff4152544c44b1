//! Encoder command-line construction
//!
//! Builders here never validate; callers are expected to have run
//! [`crate::domain::rules::validate`] on the request first.

pub mod input;
pub mod two_pass;

pub use input::{InputFlag, InputSegment};
pub use two_pass::{InvocationPlan, TwoPassBuilder};

/// Something that renders to a command-line fragment.
///
/// Each call renders afresh from the builder's current state.
pub trait Buildable {
    fn build(&self) -> String;
}
