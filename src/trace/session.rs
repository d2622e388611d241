// Trace recording for instrumented recursion

use super::call::{Call, CallId, CallStatus, Event};
use super::value::Value;
use serde::Serialize;
use tracing::{debug, warn};

/// The recorded history of one algorithm run: every call plus the event log
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trace {
    calls: Vec<Call>,
    events: Vec<Event>,
}

impl Trace {
    /// Get a call by id
    pub fn call(&self, id: CallId) -> Option<&Call> {
        self.calls.get(id.index())
    }

    /// All calls, in id order
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// The full event log
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The outermost call of the run
    pub fn root(&self) -> Option<&Call> {
        self.calls.first()
    }

    /// Number of events, i.e. the last valid replay step
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether every recorded call has ended
    pub fn is_balanced(&self) -> bool {
        self.calls.iter().all(Call::is_completed)
    }

    /// Assemble a trace directly, skipping the session's bookkeeping
    #[cfg(test)]
    pub(crate) fn from_parts(calls: Vec<Call>, events: Vec<Event>) -> Self {
        Trace { calls, events }
    }
}

/// Owns the trace of the run in progress and the logical call stack.
///
/// Pass it by `&mut` through the instrumented functions; take the finished
/// [`Trace`] out with [`TraceSession::take`].
#[derive(Debug, Default)]
pub struct TraceSession {
    trace: Trace,
    call_stack: Vec<CallId>,
}

impl TraceSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of a call and make it the top of the call stack
    pub fn start_call(
        &mut self,
        func_name: &str,
        args: Vec<Value>,
        kwargs: Vec<(String, Value)>,
    ) -> CallId {
        let id = CallId(self.trace.calls.len());
        let parent_id = self.call_stack.last().copied();

        let call = Call {
            id,
            parent_id,
            func_name: func_name.to_string(),
            args,
            kwargs,
            return_value: None,
            status: CallStatus::Running,
        };
        debug!(call = %id, depth = self.call_stack.len(), "start {}", call.signature());

        self.trace.calls.push(call);
        self.call_stack.push(id);
        self.trace.events.push(Event::Start { call_id: id });
        id
    }

    /// Complete the call on top of the stack. Does nothing if no call is open.
    pub fn end_call(&mut self, return_value: Value) {
        let Some(id) = self.call_stack.pop() else {
            warn!("end_call with an empty call stack; ignoring {}", return_value);
            return;
        };

        if let Some(call) = self.trace.calls.get_mut(id.index()) {
            debug!(call = %id, "end {} = {}", call.signature(), return_value);
            call.return_value = Some(return_value.clone());
            call.status = CallStatus::Completed;
            self.trace.events.push(Event::End {
                call_id: id,
                return_value,
            });
        }
    }

    /// Discard everything recorded so far
    pub fn reset(&mut self) {
        self.trace = Trace::default();
        self.call_stack.clear();
    }

    /// Hand out the recorded trace and leave the session empty
    pub fn take(&mut self) -> Trace {
        self.call_stack.clear();
        std::mem::take(&mut self.trace)
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn calls(&self) -> &[Call] {
        self.trace.calls()
    }

    pub fn call(&self, id: CallId) -> Option<&Call> {
        self.trace.call(id)
    }

    pub fn events(&self) -> &[Event] {
        self.trace.events()
    }

    /// Number of calls currently open
    pub fn depth(&self) -> usize {
        self.call_stack.len()
    }

    pub fn is_balanced(&self) -> bool {
        self.call_stack.is_empty() && self.trace.is_balanced()
    }
}
