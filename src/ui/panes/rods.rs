//! Tower of Hanoi rods pane

use crate::replay::{Rod, RodState};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of one rod column: room for the largest disk plus a gap
fn column_width(n_disks: u32) -> usize {
    2 * n_disks as usize + 3
}

/// Text rows for the rods, top row first, ending with the base and labels
pub(crate) fn rod_rows(state: &RodState) -> Vec<Vec<(String, Option<u32>)>> {
    let width = column_width(state.n_disks);
    let height = state.n_disks as usize + 1;
    let mut rows = Vec::with_capacity(height + 2);

    for level in (0..height).rev() {
        let row = Rod::ALL
            .iter()
            .map(|&rod| match state.rod(rod).get(level) {
                Some(&disk) => {
                    let bar = "█".repeat(2 * disk as usize - 1);
                    (format!("{:^width$}", bar, width = width), Some(disk))
                }
                None => (format!("{:^width$}", "│", width = width), None),
            })
            .collect();
        rows.push(row);
    }

    rows.push(
        Rod::ALL
            .iter()
            .map(|_| (format!("{:^width$}", "▀".repeat(width - 2), width = width), None))
            .collect(),
    );
    rows.push(
        Rod::ALL
            .iter()
            .map(|rod| (format!("{:^width$}", rod.label(), width = width), None))
            .collect(),
    );
    rows
}

/// Render the rods pane
pub fn render_rods_pane(frame: &mut Frame, area: Rect, state: &RodState, moves_done: usize) {
    let block = Block::default()
        .title(format!(" Rods ({} moves) ", moves_done))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let lines: Vec<Line> = rod_rows(state)
        .into_iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|(text, disk)| {
                    let style = match disk {
                        Some(size) => {
                            let palette = &DEFAULT_THEME.disk;
                            Style::default().fg(palette[(size as usize - 1) % palette.len()])
                        }
                        None => Style::default()
                            .fg(DEFAULT_THEME.comment)
                            .add_modifier(Modifier::BOLD),
                    };
                    Span::styled(text, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_show_disks_bottom_up() {
        let mut state = RodState::new(2);
        state.move_disk(Rod::A, Rod::B);

        let rows = rod_rows(&state);
        // two disk levels plus one spare, then base and labels
        assert_eq!(rows.len(), 5);
        let bottom = &rows[2];
        assert_eq!(bottom[0].1, Some(2));
        assert_eq!(bottom[1].1, Some(1));
        assert_eq!(bottom[2].1, None);
        assert_eq!(bottom[0].0.trim(), "███");
        assert_eq!(rows[4][2].0.trim(), "C");
    }
}
