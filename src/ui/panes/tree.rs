//! Call tree pane
//!
//! Draws the reconstructed call tree as an indented outline, one call per
//! row, with box-drawing connectors between parent and children.
//!
//! - Active calls are blue, completed calls green with their return value
//! - The focus call (touched by the latest event) is bold and marked `◆`
//! - The view scrolls to keep the focus call visible

use crate::replay::{CallTree, NodeStatus, TreeNode};
use crate::trace::CallId;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the tree pane
#[derive(Debug, Default)]
pub struct TreeScrollState {
    pub offset: usize,
    /// Focus call seen on the previous render, to auto-scroll only when it changes
    pub prev_focus: Option<CallId>,
}

/// One outline row: the node plus the connector prefix drawn before it
pub(crate) struct TreeRow<'a> {
    pub prefix: String,
    pub node: &'a TreeNode,
}

/// Flatten the tree depth-first into outline rows
pub(crate) fn outline(tree: &CallTree) -> Vec<TreeRow<'_>> {
    let mut rows = Vec::with_capacity(tree.nodes.len());
    for root in tree.roots() {
        rows.push(TreeRow {
            prefix: String::new(),
            node: root,
        });
        push_children(tree, root.id, "", &mut rows);
    }
    rows
}

fn push_children<'a>(tree: &'a CallTree, id: CallId, indent: &str, rows: &mut Vec<TreeRow<'a>>) {
    let children: Vec<&TreeNode> = tree.children(id).collect();
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        let last = i + 1 == count;
        rows.push(TreeRow {
            prefix: format!("{}{}", indent, if last { "└─ " } else { "├─ " }),
            node: child,
        });
        let next_indent = format!("{}{}", indent, if last { "   " } else { "│  " });
        push_children(tree, child.id, &next_indent, rows);
    }
}

fn row_line<'a>(row: &TreeRow<'a>) -> Line<'a> {
    let node = row.node;
    let marker = match node.status {
        NodeStatus::Completed => "✓ ",
        NodeStatus::Active => "● ",
        NodeStatus::Pending => "○ ",
    };
    let status_style = Style::default().fg(DEFAULT_THEME.call_status(node.status));
    let label_style = if node.is_focus {
        status_style.add_modifier(Modifier::BOLD)
    } else {
        status_style
    };

    let mut spans = vec![
        Span::styled(row.prefix.clone(), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(marker, status_style),
        Span::styled(node.label.clone(), label_style),
    ];
    if let Some(ret) = &node.return_label {
        spans.push(Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)));
        let style = if ret.starts_with("Error") {
            Style::default().fg(DEFAULT_THEME.error)
        } else {
            Style::default().fg(DEFAULT_THEME.return_value)
        };
        spans.push(Span::styled(ret.clone(), style));
    }
    if node.is_focus {
        spans.push(Span::styled(
            "  ◆",
            Style::default()
                .fg(DEFAULT_THEME.focus_marker)
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// Render the call tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    tree: &CallTree,
    is_focused: bool,
    scroll_state: &mut TreeScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let title = format!(
        " Call Tree ({} active, {} returned) ",
        tree.active.len(),
        tree.completed.len()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let rows = outline(tree);
    if rows.is_empty() {
        let empty = ListItem::new("(no calls yet)").style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(List::new(vec![empty]).block(block), area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Smart auto-scroll: follow the focus call when it changes
    if tree.focus != scroll_state.prev_focus {
        if let Some(row) = rows.iter().position(|r| r.node.is_focus) {
            if row < scroll_state.offset {
                scroll_state.offset = row;
            } else if row >= scroll_state.offset + visible_height {
                scroll_state.offset = row + 1 - visible_height;
            }
        }
        scroll_state.prev_focus = tree.focus;
    }

    let max_scroll = rows.len().saturating_sub(visible_height);
    scroll_state.offset = scroll_state.offset.min(max_scroll);

    let items: Vec<ListItem> = rows
        .iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|row| ListItem::new(row_line(row)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Algorithm;
    use crate::replay::reconstruct;

    #[test]
    fn outline_draws_connectors() {
        let run = Algorithm::Fibonacci.run(3);
        let tree = reconstruct(&run.trace, run.trace.len()).unwrap();
        let rows: Vec<String> = outline(&tree)
            .iter()
            .map(|r| format!("{}{}", r.prefix, r.node.label))
            .collect();

        assert_eq!(
            rows,
            vec![
                "fibonacci(3)",
                "├─ fibonacci(2)",
                "│  ├─ fibonacci(1)",
                "│  └─ fibonacci(0)",
                "└─ fibonacci(1)",
            ]
        );
    }

    #[test]
    fn outline_grows_with_step() {
        let run = Algorithm::Factorial.run(3);
        let early = reconstruct(&run.trace, 2).unwrap();
        assert_eq!(outline(&early).len(), 2);
    }
}
