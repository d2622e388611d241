//! Replay of a recorded trace
//!
//! Every view here is a pure function of a trace and a step count `step`
//! in `0..=trace.len()`: the first `step` events are replayed in order and
//! the derived state is returned. Nothing is cached, so the same prefix
//! always yields the same result.
//!
//! - [`tree`]: call-tree nodes, edges, and per-node status
//! - [`hanoi`]: disk positions on the three rods, inferred from call completion
//! - [`narrative`]: a plain-language description of the latest event

pub mod hanoi;
pub mod narrative;
pub mod tree;

pub use hanoi::{reconstruct_rods, Move, Rod, RodState};
pub use narrative::Narrative;
pub use tree::{reconstruct, CallTree, NodeStatus, TreeNode};

use crate::errors::ReplayError;
use crate::trace::{Call, CallId, Event, Trace};

/// The events to replay for `step`, or an error if `step` is past the end
pub(crate) fn prefix(trace: &Trace, step: usize) -> Result<&[Event], ReplayError> {
    trace
        .events()
        .get(..step)
        .ok_or(ReplayError::StepOutOfRange {
            step,
            len: trace.len(),
        })
}

pub(crate) fn lookup(trace: &Trace, id: CallId) -> Result<&Call, ReplayError> {
    trace.call(id).ok_or(ReplayError::UnknownCall { id })
}
