//! Tower of Hanoi rod reconstruction
//!
//! The trace has no explicit "move disk" events, so moves are inferred from
//! the shape of the recursion:
//!
//! - a base-case call (`n == 1`) moves one disk from its `source` to its
//!   `target` when it ends;
//! - a recursive call (`n > 1`) moves its own disk between its two
//!   sub-calls, i.e. as soon as its first child ends. The parent is then
//!   credited so the second child's end does not move again.
//!
//! The outermost call never moves anything at its own end; all of its moves
//! were already attributed through its children.

use super::{lookup, prefix};
use crate::errors::ReplayError;
use crate::trace::{Call, CallId, Event, Trace, Value};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// One of the three pegs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rod {
    A,
    B,
    C,
}

impl Rod {
    pub const ALL: [Rod; 3] = [Rod::A, Rod::B, Rod::C];

    pub fn from_label(label: &str) -> Option<Rod> {
        match label {
            "A" => Some(Rod::A),
            "B" => Some(Rod::B),
            "C" => Some(Rod::C),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rod::A => "A",
            Rod::B => "B",
            Rod::C => "C",
        }
    }

    fn index(self) -> usize {
        match self {
            Rod::A => 0,
            Rod::B => 1,
            Rod::C => 2,
        }
    }
}

impl fmt::Display for Rod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A disk move inferred from the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    /// The call the move is attributed to
    pub call_id: CallId,
    pub from: Rod,
    pub to: Rod,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.from, self.to)
    }
}

/// Disks on each rod, listed bottom to top
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RodState {
    pub n_disks: u32,
    rods: [Vec<u32>; 3],
}

impl RodState {
    /// All `n_disks` disks stacked on rod A, largest at the bottom
    pub fn new(n_disks: u32) -> Self {
        RodState {
            n_disks,
            rods: [(1..=n_disks).rev().collect(), Vec::new(), Vec::new()],
        }
    }

    /// Disks on `rod`, bottom to top
    pub fn rod(&self, rod: Rod) -> &[u32] {
        &self.rods[rod.index()]
    }

    /// Move the top disk of `from` onto `to`. Returns the disk moved, or
    /// `None` if `from` was empty.
    pub fn move_disk(&mut self, from: Rod, to: Rod) -> Option<u32> {
        let disk = self.rods[from.index()].pop()?;
        self.rods[to.index()].push(disk);
        Some(disk)
    }
}

/// Inferred moves after the first `step` events, in the order they happen
pub fn moves(trace: &Trace, step: usize) -> Result<Vec<Move>, ReplayError> {
    let events = prefix(trace, step)?;
    let mut credited = FxHashSet::default();
    let mut moves = Vec::new();

    for event in events {
        let Event::End { call_id, .. } = event else {
            continue;
        };
        let call = lookup(trace, *call_id)?;
        let (n, from, to) = hanoi_args(call)?;
        if n == 1 {
            moves.push(Move {
                call_id: call.id,
                from,
                to,
            });
        }

        let Some(parent_id) = call.parent_id else {
            continue;
        };
        let parent = lookup(trace, parent_id)?;
        let (parent_n, parent_from, parent_to) = hanoi_args(parent)?;
        if parent_n > 1 && credited.insert(parent_id) {
            moves.push(Move {
                call_id: parent_id,
                from: parent_from,
                to: parent_to,
            });
        }
    }

    Ok(moves)
}

/// Disk positions after the first `step` events
pub fn reconstruct_rods(n_disks: u32, trace: &Trace, step: usize) -> Result<RodState, ReplayError> {
    let mut state = RodState::new(n_disks);
    for m in moves(trace, step)? {
        if state.move_disk(m.from, m.to).is_none() {
            debug!(call = %m.call_id, "move {} from an empty rod ignored", m);
        }
    }
    Ok(state)
}

/// `(n, source, target)` of a `tower_of_hanoi` call
fn hanoi_args(call: &Call) -> Result<(i64, Rod, Rod), ReplayError> {
    let not_hanoi = || ReplayError::NotHanoiCall { id: call.id };
    let n = call.n().ok_or_else(not_hanoi)?;
    let rod = |index: usize| -> Result<Rod, ReplayError> {
        let label = call
            .args
            .get(index)
            .and_then(Value::as_text)
            .ok_or_else(not_hanoi)?;
        Rod::from_label(label).ok_or_else(|| ReplayError::UnknownRod {
            id: call.id,
            label: label.to_string(),
        })
    };
    Ok((n, rod(1)?, rod(2)?))
}
