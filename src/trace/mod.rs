//! Recursion tracing
//!
//! This module records recursive function calls as a flat, replayable log:
//! - [`Value`]: arguments and return values, captured by value
//! - [`Call`]: one invocation, with its parent and final return value
//! - [`Event`]: a start or end notification, in execution order
//! - [`TraceSession`]: owns the log of the run in progress
//! - [`Instrumented`]: wraps a function body so every invocation is recorded
//!
//! # Stack discipline
//!
//! Recursion is synchronous, so events nest strictly: a call's start precedes
//! every event of its children and its end follows them. Every end event
//! closes the most recent open start. [`Instrumented`] records an end event
//! even when the body returns an error, so a finished run is always
//! balanced.

pub mod call;
pub mod instrument;
pub mod session;
pub mod value;

pub use call::{Call, CallId, CallStatus, Event};
pub use instrument::Instrumented;
pub use session::{Trace, TraceSession};
pub use value::Value;
