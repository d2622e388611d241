//! Execution flow pane: what the latest event means

use crate::algorithms::Algorithm;
use crate::replay::Narrative;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Data needed to render the narrative pane
pub struct NarrativeRenderData<'a> {
    pub algorithm: Algorithm,
    pub n: i64,
    pub narrative: Option<&'a Narrative>,
    /// Error raised by the outermost call, if the run failed
    pub failure: Option<String>,
}

/// Render the narrative pane
pub fn render_narrative_pane(
    frame: &mut Frame,
    area: Rect,
    data: NarrativeRenderData,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {}({}) ", data.algorithm.name(), data.n))
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 1, 0, 0));

    let mut lines: Vec<Line> = Vec::new();

    match data.narrative {
        None => {
            // Before the first step: describe the algorithm
            let info = data.algorithm.info();
            lines.push(Line::from(Span::styled(
                info.description,
                Style::default().fg(DEFAULT_THEME.fg),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Time: ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(info.time_complexity, Style::default().fg(DEFAULT_THEME.number)),
                Span::styled("  Space: ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(info.space_complexity, Style::default().fg(DEFAULT_THEME.number)),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Insight: {}", info.insight),
                Style::default()
                    .fg(DEFAULT_THEME.type_name)
                    .add_modifier(Modifier::ITALIC),
            )));
            if let Some(warning) = data.algorithm.warning(data.n) {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("⚠ {}", warning),
                    Style::default().fg(DEFAULT_THEME.secondary),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press → to start the visualization.",
                Style::default().fg(DEFAULT_THEME.comment),
            )));
        }
        Some(narrative) => {
            lines.push(Line::from(Span::styled(
                narrative.headline.clone(),
                Style::default()
                    .fg(DEFAULT_THEME.function)
                    .add_modifier(Modifier::BOLD),
            )));
            for detail in &narrative.details {
                lines.push(Line::from(Span::styled(
                    detail.clone(),
                    Style::default().fg(DEFAULT_THEME.fg),
                )));
            }
            if narrative.finished {
                lines.push(Line::from(""));
                let (text, color) = match &data.failure {
                    Some(err) => (format!("✗ Algorithm raised: {}", err), DEFAULT_THEME.error),
                    None => (
                        "✓ Algorithm completed! All recursive calls have returned.".to_string(),
                        DEFAULT_THEME.success,
                    ),
                };
                lines.push(Line::from(Span::styled(
                    text,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )));
            }
        }
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
