//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`tree`]: Call tree outline with per-call status and the focus marker
//! - [`source`]: Algorithm listing with the line for the current event
//! - [`narrative`]: What the current event means, or the algorithm blurb at step 0
//! - [`rods`]: Tower of Hanoi disk positions
//! - [`status`]: Status bar with keybindings and playback state
//!
//! Each pane module exports a primary `render_*` function plus whatever
//! scroll or render-data types it needs. Panes are stateless apart from the
//! scroll state the app hands them.

pub mod narrative;
pub mod rods;
pub mod source;
pub mod status;
pub mod tree;

pub use narrative::{render_narrative_pane, NarrativeRenderData};
pub use rods::render_rods_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use tree::{render_tree_pane, TreeScrollState};
