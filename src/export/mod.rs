//! Text exports of a run
//!
//! - [`to_dot`]: the call tree at one step as a Graphviz digraph, styled the
//!   way the TUI colors nodes (blue active, green completed, thick focus)
//! - [`to_json`]: the full trace and outcome, for feeding other tools

use crate::algorithms::{Algorithm, Run};
use crate::replay::{CallTree, NodeStatus};
use crate::trace::{Trace, Value};
use serde::Serialize;
use std::fmt::Write;

const ACTIVE_COLOR: &str = "#007bff";
const ACTIVE_FILL: &str = "#cce5ff";
const COMPLETED_COLOR: &str = "#28a745";
const COMPLETED_FILL: &str = "#d4edda";

/// Render a reconstructed call tree as Graphviz DOT
pub fn to_dot(tree: &CallTree) -> String {
    let mut out = String::from("digraph {\n    rankdir=TB\n    node [shape=box fontsize=10]\n");

    for node in &tree.nodes {
        let mut label = node.label.clone();
        if let Some(ret) = &node.return_label {
            label.push_str("\nReturn: ");
            label.push_str(ret);
        }
        let (color, style, fill) = match node.status {
            NodeStatus::Completed => (COMPLETED_COLOR, "filled", COMPLETED_FILL),
            NodeStatus::Active => (ACTIVE_COLOR, "filled", ACTIVE_FILL),
            NodeStatus::Pending => ("black", "solid", "white"),
        };
        let penwidth = if node.is_focus { "3.0" } else { "1.0" };
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "    {} [label=\"{}\" color=\"{}\" style={} fillcolor=\"{}\" penwidth={}]",
            node.id,
            escape(&label),
            color,
            style,
            fill,
            penwidth
        );
    }
    for (parent, child) in &tree.edges {
        let _ = writeln!(out, "    {} -> {}", parent, child);
    }

    out.push_str("}\n");
    out
}

fn escape(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Outcome<'a> {
    Returned(&'a Value),
    Raised(String),
}

#[derive(Serialize)]
struct RunExport<'a> {
    algorithm: Algorithm,
    n: i64,
    outcome: Outcome<'a>,
    trace: &'a Trace,
}

/// Serialize a run's trace and outcome as pretty-printed JSON
pub fn to_json(run: &Run) -> serde_json::Result<String> {
    let outcome = match &run.outcome {
        Ok(value) => Outcome::Returned(value),
        Err(err) => Outcome::Raised(err.to_string()),
    };
    serde_json::to_string_pretty(&RunExport {
        algorithm: run.algorithm,
        n: run.n,
        outcome,
        trace: &run.trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::reconstruct;

    #[test]
    fn dot_marks_focus_and_edges() {
        let run = Algorithm::Factorial.run(1);
        let tree = reconstruct(&run.trace, 3).unwrap();
        let dot = to_dot(&tree);

        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains(
            "    1 [label=\"factorial(0)\\nReturn: 1\" color=\"#28a745\" style=filled fillcolor=\"#d4edda\" penwidth=3.0]"
        ));
        assert!(dot.contains("    0 [label=\"factorial(1)\" color=\"#007bff\""));
        assert!(dot.contains("    0 -> 1\n"));
    }

    #[test]
    fn dot_escapes_quotes() {
        assert_eq!(escape("say \"hi\"\nnow"), "say \\\"hi\\\"\\nnow");
    }

    #[test]
    fn json_includes_outcome() {
        let run = Algorithm::Factorial.run(-1);
        let json = to_json(&run).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["algorithm"], "factorial");
        assert_eq!(parsed["outcome"]["raised"], "factorial() is undefined for n = -1");
        assert_eq!(parsed["trace"]["events"].as_array().map(Vec::len), Some(2));
        assert_eq!(parsed["trace"]["calls"][0]["status"], "completed");
        assert_eq!(parsed["trace"]["calls"][0]["id"], 0);
    }
}
