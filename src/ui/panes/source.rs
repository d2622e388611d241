//! Source listing pane with syntax highlighting
//!
//! Shows the running algorithm's listing with basic Rust syntax highlighting.
//! The line matching the current event is highlighted and followed by an
//! explanatory comment line.

use crate::algorithms::listing::{Highlight, Listing};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for the Rust listings
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Handle comments
        if c == '/' && i + 1 < chars.len() && chars[i + 1] == '/' {
            if !current_word.is_empty() {
                spans.push(Span::raw(current_word.clone()));
                current_word.clear();
            }
            let rest: String = chars[i..].iter().collect();
            spans.push(Span::styled(rest, Style::default().fg(DEFAULT_THEME.comment)));
            break;
        }

        // Handle strings
        if c == '"' {
            if !current_word.is_empty() {
                spans.push(Span::raw(current_word.clone()));
                current_word.clear();
            }
            let mut end = i + 1;
            while end < chars.len() && chars[end] != '"' {
                if chars[end] == '\\' {
                    end += 2;
                } else {
                    end += 1;
                }
            }
            let end = (end + 1).min(chars.len());
            let literal: String = chars[i..end].iter().collect();
            spans.push(Span::styled(literal, Style::default().fg(DEFAULT_THEME.string)));
            i = end;
            continue;
        }

        // Handle non-alphanumeric (delimiters)
        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                let is_func = c == '(' || c == '!';
                let style = get_keyword_style(&current_word, is_func);
                spans.push(Span::styled(current_word.clone(), style));
                current_word.clear();
            }

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = get_keyword_style(&current_word, false);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    match word {
        "i64" | "str" | "String" => Style::default().fg(DEFAULT_THEME.type_name),
        "fn" | "if" | "else" | "return" | "let" | "mut" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        _ if word.chars().all(|c| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ => {
            if is_function {
                Style::default().fg(DEFAULT_THEME.function)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            }
        }
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
}

/// Render the source listing pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    listing: &Listing,
    highlight: Option<&Highlight>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Live Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut all_lines: Vec<Line> = Vec::new();
    let mut current_row = None;

    for (idx, line) in listing.lines.iter().enumerate() {
        let highlighted = highlight.filter(|h| h.line == idx);
        let line_num_str = format!("{:3} ", idx + 1);

        let mut content_line = highlight_source_code(line);
        let num_style = if highlighted.is_some() {
            let base = Style::default().bg(DEFAULT_THEME.current_line_bg);
            for span in &mut content_line.spans {
                span.style = span.style.patch(base);
            }
            current_row = Some(all_lines.len());
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.comment)
        };

        let mut spans = vec![Span::styled(line_num_str, num_style)];
        spans.extend(content_line.spans);
        all_lines.push(Line::from(spans));

        if let Some(h) = highlighted {
            all_lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(
                    format!("▲ {}", h.comment),
                    Style::default()
                        .fg(DEFAULT_THEME.success)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]));
        }
    }

    // Keep the highlighted line and its comment on screen
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if let Some(row) = current_row {
        if row < scroll_state.offset {
            scroll_state.offset = row;
        } else if row + 2 > scroll_state.offset + visible_height {
            scroll_state.offset = (row + 2).saturating_sub(visible_height);
        }
    }
    let max_scroll = all_lines.len().saturating_sub(visible_height);
    scroll_state.offset = scroll_state.offset.min(max_scroll);

    let visible_lines: Vec<Line> = all_lines
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
