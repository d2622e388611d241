//! Color palette shared by every pane

use ratatui::style::Color;

use crate::replay::NodeStatus;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red

    // Listing syntax
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub function: Color,
    pub type_name: Color,

    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,

    // Call tree
    pub active_call: Color,
    pub completed_call: Color,
    pub pending_call: Color,
    pub focus_marker: Color,
    pub return_value: Color,

    /// Disk colors, smallest first; cycles for taller towers
    pub disk: [Color; 5],
}

impl Theme {
    pub fn call_status(&self, status: NodeStatus) -> Color {
        match status {
            NodeStatus::Active => self.active_call,
            NodeStatus::Completed => self.completed_call,
            NodeStatus::Pending => self.pending_call,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),

    keyword: Color::Rgb(137, 180, 250),
    string: Color::Rgb(250, 179, 135),
    number: Color::Rgb(250, 179, 135),
    function: Color::Rgb(249, 226, 175),
    type_name: Color::Rgb(148, 226, 213),

    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(108, 112, 134),
    current_line_bg: Color::Rgb(50, 50, 70),

    active_call: Color::Rgb(116, 199, 236),    // Sapphire, like the DOT fill for running calls
    completed_call: Color::Rgb(166, 227, 161), // Green
    pending_call: Color::Rgb(88, 91, 112),
    focus_marker: Color::Rgb(249, 226, 175),
    return_value: Color::Rgb(245, 194, 231), // Pink

    disk: [
        Color::Rgb(137, 220, 235),
        Color::Rgb(116, 199, 236),
        Color::Rgb(137, 180, 250),
        Color::Rgb(180, 190, 254),
        Color::Rgb(203, 166, 247),
    ],
};
