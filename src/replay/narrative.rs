//! Plain-language description of the latest replayed event

use super::{lookup, prefix};
use crate::errors::ReplayError;
use crate::trace::{Event, Trace};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub step: usize,
    pub total: usize,
    pub headline: String,
    pub details: Vec<String>,
    /// Set on the last step of the trace
    pub finished: bool,
}

/// Describe event `step - 1`. Returns `None` at step 0, before anything has happened.
pub fn describe(trace: &Trace, step: usize) -> Result<Option<Narrative>, ReplayError> {
    let events = prefix(trace, step)?;
    let Some(event) = events.last() else {
        return Ok(None);
    };

    let call = lookup(trace, event.call_id())?;
    let parent = call.parent_id.map(|id| lookup(trace, id)).transpose()?;

    let (headline, details) = match event {
        Event::Start { .. } => {
            let context = match parent {
                Some(parent) => format!(
                    "Called by {} which is currently waiting.",
                    parent.signature()
                ),
                None => "This is the root call.".to_string(),
            };
            (format!("Calling {}", call.signature()), vec![context])
        }
        Event::End { return_value, .. } => {
            let mut details = vec![format!("Result: {}", return_value)];
            if let Some(parent) = parent {
                details.push(format!("Control returns to {}.", parent.signature()));
            }
            (format!("Returning from {}", call.signature()), details)
        }
    };

    Ok(Some(Narrative {
        step,
        total: trace.len(),
        headline,
        details,
        finished: step == trace.len(),
    }))
}
