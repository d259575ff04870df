//! Step recording for encoder visualization.
//!
//! Encoders report every emission (a flushed run, a literal, a finished
//! word or segment) to a [`StepRecorder`]. Plain compression passes
//! [`NoTrace`], which drops every step and lets the encoder skip building
//! step records entirely; traced compression collects steps into a `Vec`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Receives encoder steps in emission order.
pub trait StepRecorder<S> {
    /// Record one step.
    fn record(&mut self, step: S);

    /// Whether steps are kept. Encoders skip constructing steps when this
    /// returns `false`.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Recorder that discards every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl<S> StepRecorder<S> for NoTrace {
    #[inline]
    fn record(&mut self, _step: S) {}

    #[inline]
    fn is_enabled(&self) -> bool {
        false
    }
}

impl<S> StepRecorder<S> for Vec<S> {
    fn record(&mut self, step: S) {
        self.push(step);
    }
}

/// Value repeated by a run of chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunType {
    /// A run of all-zero chunks.
    #[serde(rename = "0")]
    Zeros,
    /// A run of all-one chunks.
    #[serde(rename = "1")]
    Ones,
}

impl RunType {
    /// The header bit stored for this run type.
    pub const fn bit(self) -> u64 {
        match self {
            Self::Zeros => 0,
            Self::Ones => 1,
        }
    }

    /// Run type for a header bit.
    pub const fn from_bit(bit: bool) -> Self {
        if bit { Self::Ones } else { Self::Zeros }
    }
}

impl fmt::Display for RunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Zeros => "0",
            Self::Ones => "1",
        })
    }
}
