//! Call-tree reconstruction
//!
//! Replaying a prefix of the event log sorts calls into three sets:
//!
//! - **visible**: started at some point in the prefix
//! - **active**: started and not yet ended
//! - **completed**: ended
//!
//! Visible calls become nodes. A node's parent is always visible as well,
//! since a child cannot start before its parent, so every parent link
//! becomes an edge. The call touched by the last replayed event is the
//! *focus*.

use super::{lookup, prefix};
use crate::errors::ReplayError;
use crate::trace::{CallId, Event, Trace};
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Longest return value shown in full on a node
pub const MAX_RETURN_LABEL: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// Not started yet. Never produced for a visible node.
    Pending,
    Active,
    Completed,
}

/// One call as it appears at the replayed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub id: CallId,
    pub parent: Option<CallId>,
    /// `func(args)`
    pub label: String,
    /// Truncated return value, once the call has completed
    pub return_label: Option<String>,
    pub status: NodeStatus,
    pub is_focus: bool,
}

/// The call tree after replaying `step` events
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallTree {
    pub step: usize,
    /// Visible calls in id order
    pub nodes: Vec<TreeNode>,
    /// `(parent, child)` pairs in child id order
    pub edges: Vec<(CallId, CallId)>,
    pub active: Vec<CallId>,
    pub completed: Vec<CallId>,
    pub focus: Option<CallId>,
}

impl CallTree {
    pub fn node(&self, id: CallId) -> Option<&TreeNode> {
        self.nodes
            .binary_search_by_key(&id, |node| node.id)
            .ok()
            .map(|i| &self.nodes[i])
    }

    /// Direct children of `id`, in call order
    pub fn children(&self, id: CallId) -> impl Iterator<Item = &TreeNode> + '_ {
        self.nodes.iter().filter(move |node| node.parent == Some(id))
    }

    /// Visible calls without a visible parent
    pub fn roots(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.nodes.iter().filter(|node| node.parent.is_none())
    }
}

/// Rebuild the call tree as it stood after the first `step` events
pub fn reconstruct(trace: &Trace, step: usize) -> Result<CallTree, ReplayError> {
    let events = prefix(trace, step)?;

    let mut active = FxHashSet::default();
    let mut completed = FxHashSet::default();
    let mut visible = FxHashSet::default();

    for event in events {
        let id = event.call_id();
        lookup(trace, id)?;
        match event {
            Event::Start { .. } => {
                active.insert(id);
                visible.insert(id);
            }
            Event::End { .. } => {
                active.remove(&id);
                completed.insert(id);
            }
        }
    }

    let focus = events.last().map(Event::call_id);

    let mut ids: Vec<CallId> = visible.iter().copied().collect();
    ids.sort_unstable();

    let mut nodes = Vec::with_capacity(ids.len());
    let mut edges = Vec::new();
    for id in ids {
        let call = lookup(trace, id)?;
        let status = if completed.contains(&id) {
            NodeStatus::Completed
        } else if active.contains(&id) {
            NodeStatus::Active
        } else {
            NodeStatus::Pending
        };
        let return_label = match status {
            NodeStatus::Completed => call
                .return_value
                .as_ref()
                .map(|value| truncate_label(&value.to_string())),
            _ => None,
        };

        if let Some(parent) = call.parent_id.filter(|p| visible.contains(p)) {
            edges.push((parent, id));
        }
        nodes.push(TreeNode {
            id,
            parent: call.parent_id,
            label: call.signature(),
            return_label,
            status,
            is_focus: focus == Some(id),
        });
    }

    Ok(CallTree {
        step,
        nodes,
        edges,
        active: sorted(active),
        completed: sorted(completed),
        focus,
    })
}

/// Cap `text` at [`MAX_RETURN_LABEL`] characters, ending in `...` when cut
pub fn truncate_label(text: &str) -> String {
    if text.chars().count() <= MAX_RETURN_LABEL {
        return text.to_string();
    }
    let kept: String = text.chars().take(MAX_RETURN_LABEL - 3).collect();
    format!("{}...", kept)
}

fn sorted(set: FxHashSet<CallId>) -> Vec<CallId> {
    let mut ids: Vec<CallId> = set.into_iter().collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Algorithm;

    #[test]
    fn step_zero_is_empty() {
        let run = Algorithm::Factorial.run(2);
        let tree = reconstruct(&run.trace, 0).unwrap();
        assert!(tree.nodes.is_empty());
        assert!(tree.edges.is_empty());
        assert_eq!(tree.focus, None);
    }

    #[test]
    fn first_start_shows_active_root() {
        let run = Algorithm::Factorial.run(2);
        let tree = reconstruct(&run.trace, 1).unwrap();
        assert_eq!(tree.nodes.len(), 1);
        let root = &tree.nodes[0];
        assert_eq!(root.label, "factorial(2)");
        assert_eq!(root.status, NodeStatus::Active);
        assert!(root.is_focus);
        assert_eq!(root.return_label, None);
    }

    #[test]
    fn end_event_focuses_returning_call() {
        // factorial(1): start 0, start 1, end 1, end 0
        let run = Algorithm::Factorial.run(1);
        let tree = reconstruct(&run.trace, 3).unwrap();
        assert_eq!(tree.focus, Some(CallId(1)));
        assert_eq!(tree.active, vec![CallId(0)]);
        assert_eq!(tree.completed, vec![CallId(1)]);
        assert_eq!(tree.edges, vec![(CallId(0), CallId(1))]);

        let child = tree.node(CallId(1)).unwrap();
        assert_eq!(child.status, NodeStatus::Completed);
        assert_eq!(child.return_label.as_deref(), Some("1"));
    }

    #[test]
    fn out_of_range_step_fails() {
        let run = Algorithm::Factorial.run(1);
        let len = run.trace.len();
        assert_eq!(
            reconstruct(&run.trace, len + 1),
            Err(ReplayError::StepOutOfRange { step: len + 1, len })
        );
        assert!(reconstruct(&run.trace, len).is_ok());
    }

    #[test]
    fn long_return_values_are_truncated() {
        assert_eq!(truncate_label("Done"), "Done");
        assert_eq!(truncate_label("12345678901234567890"), "12345678901234567890");
        assert_eq!(
            truncate_label("Error: integer overflow in factorial(21)"),
            "Error: integer ov..."
        );
    }

    #[test]
    fn children_in_call_order() {
        let run = Algorithm::Fibonacci.run(3);
        let tree = reconstruct(&run.trace, run.trace.len()).unwrap();
        let children: Vec<&str> = tree
            .children(CallId(0))
            .map(|node| node.label.as_str())
            .collect();
        assert_eq!(children, vec!["fibonacci(2)", "fibonacci(1)"]);
        assert_eq!(tree.roots().count(), 1);
    }
}
