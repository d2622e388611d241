//! Error types for traced algorithms and trace replay
//!
//! [`AlgorithmError`] is raised by instrumented function bodies. The tracer
//! records it as the failing call's return value and hands it back to the
//! caller unchanged.
//!
//! [`ReplayError`] covers contract violations when replaying a trace: asking
//! for a step past the end of the log, or a log that references calls it
//! never recorded.

use crate::trace::CallId;
use thiserror::Error;

/// Errors raised while running an instrumented algorithm
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgorithmError {
    /// Input is below the algorithm's domain (e.g. factorial of a negative number)
    #[error("{function}() is undefined for n = {n}")]
    NegativeInput { function: String, n: i64 },

    /// Argument is outside the range the algorithm accepts
    #[error("invalid argument to {function}(): {message}")]
    InvalidArgument { function: String, message: String },

    /// Wrong number of positional arguments
    #[error("{function}() expects {expected} argument{}, got {got}", plural(.expected))]
    ArgumentCount {
        function: String,
        expected: usize,
        got: usize,
    },

    /// Positional argument has the wrong type
    #[error("{function}() argument {index} must be {expected}, got {got}")]
    ArgumentType {
        function: String,
        index: usize,
        expected: &'static str,
        got: String,
    },

    /// Integer arithmetic overflowed
    #[error("integer overflow in {function}({n})")]
    Overflow { function: String, n: i64 },
}

fn plural(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

/// Errors raised while replaying a recorded trace
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// Requested step lies past the end of the event log
    #[error("step {step} is out of range (trace has {len} events)")]
    StepOutOfRange { step: usize, len: usize },

    /// An event refers to a call that is not in the trace
    #[error("event references unknown call #{id}")]
    UnknownCall { id: CallId },

    /// A Hanoi call names a rod other than A, B or C
    #[error("call #{id} names unknown rod '{label}'")]
    UnknownRod { id: CallId, label: String },

    /// A Hanoi call is missing its (n, source, target) arguments
    #[error("call #{id} is not a Tower of Hanoi invocation")]
    NotHanoiCall { id: CallId },

    /// Cannot step backward from the first step
    #[error("already at the beginning of the trace")]
    AtStart,

    /// Cannot step forward from the last step
    #[error("already at the end of the trace")]
    AtEnd,
}

impl ReplayError {
    /// The call this error is about, if any
    pub fn call_id(&self) -> Option<CallId> {
        match self {
            ReplayError::UnknownCall { id } => Some(*id),
            ReplayError::UnknownRod { id, .. } => Some(*id),
            ReplayError::NotHanoiCall { id } => Some(*id),
            ReplayError::StepOutOfRange { .. } => None,
            ReplayError::AtStart => None,
            ReplayError::AtEnd => None,
        }
    }
}
