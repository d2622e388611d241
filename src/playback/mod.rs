// Step-by-step navigation over a finished run

use crate::algorithms::listing::Highlight;
use crate::algorithms::{Algorithm, Run};
use crate::errors::ReplayError;
use crate::replay::{self, CallTree, Narrative, RodState};
use crate::trace::{Call, Event, Trace};

/// A finished run plus the position of the replay cursor.
///
/// The position is a step count in `0..=total_steps()`: step 0 shows
/// nothing, step `k` shows the state after the first `k` events.
#[derive(Debug, Clone)]
pub struct Playback {
    run: Run,
    position: usize,
}

impl Playback {
    /// Start at step 0
    pub fn new(run: Run) -> Self {
        Playback { run, position: 0 }
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn trace(&self) -> &Trace {
        &self.run.trace
    }

    pub fn algorithm(&self) -> Algorithm {
        self.run.algorithm
    }

    /// Current step
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_steps(&self) -> usize {
        self.run.trace.len()
    }

    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.position == self.total_steps()
    }

    /// Advance one event
    pub fn step_forward(&mut self) -> Result<(), ReplayError> {
        if self.is_at_end() {
            return Err(ReplayError::AtEnd);
        }
        self.position += 1;
        Ok(())
    }

    /// Go back one event
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        if self.is_at_start() {
            return Err(ReplayError::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    /// Advance up to `count` events, stopping at the end. Returns how many were taken.
    pub fn step_forward_by(&mut self, count: usize) -> usize {
        let taken = count.min(self.total_steps() - self.position);
        self.position += taken;
        taken
    }

    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.total_steps();
    }

    /// Move to an arbitrary step
    pub fn seek(&mut self, step: usize) -> Result<(), ReplayError> {
        if step > self.total_steps() {
            return Err(ReplayError::StepOutOfRange {
                step,
                len: self.total_steps(),
            });
        }
        self.position = step;
        Ok(())
    }

    /// The event that produced the current step, if any
    pub fn current_event(&self) -> Option<&Event> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.run.trace.events().get(i))
    }

    /// The call the current event belongs to
    pub fn current_call(&self) -> Option<&Call> {
        self.current_event()
            .and_then(|event| self.run.trace.call(event.call_id()))
    }

    // ========== Views of the current step ==========

    pub fn tree(&self) -> Result<CallTree, ReplayError> {
        replay::reconstruct(&self.run.trace, self.position)
    }

    /// Rod state, for Tower of Hanoi runs only
    pub fn rods(&self) -> Result<Option<RodState>, ReplayError> {
        if self.run.algorithm != Algorithm::Hanoi {
            return Ok(None);
        }
        let n_disks = u32::try_from(self.run.n).unwrap_or(0);
        replay::reconstruct_rods(n_disks, &self.run.trace, self.position).map(Some)
    }

    pub fn narrative(&self) -> Result<Option<Narrative>, ReplayError> {
        replay::narrative::describe(&self.run.trace, self.position)
    }

    /// Listing line for the current event
    pub fn highlight(&self) -> Option<Highlight> {
        let event = self.current_event()?;
        let call = self.current_call()?;
        Some(self.run.algorithm.highlight(event, call))
    }
}
