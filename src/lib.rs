//! # Introduction
//!
//! recurtty runs a recursive algorithm once, records every call and return
//! as a flat event log, and then replays that log step by step: the call
//! tree as it grows and unwinds, a narrative of each event, and for Tower of
//! Hanoi the disks moving between rods.
//!
//! ## Pipeline
//!
//! ```text
//! Algorithm + n → Instrumented run → Trace (calls + events) → Replay(step) → TUI / export
//! ```
//!
//! 1. [`trace`]: [`trace::TraceSession`] records calls; [`trace::Instrumented`]
//!    wraps a function body so every recursive invocation is bracketed by a
//!    start and an end event, even when it raises.
//! 2. [`algorithms`]: Fibonacci, factorial and Tower of Hanoi as instrumented
//!    functions, with metadata and source listings.
//! 3. [`replay`]: pure reconstruction of the call tree, the Hanoi rods and a
//!    narrative from any prefix of the event log.
//! 4. [`playback`]: a finished run plus a cursor with first/prev/next/last
//!    navigation.
//! 5. [`export`]: Graphviz DOT and JSON output.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.

pub mod algorithms;
pub mod errors;
pub mod export;
pub mod playback;
pub mod replay;
pub mod trace;
pub mod ui;
