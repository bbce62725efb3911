use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub compared: Color,  // Cells touched by the current event
    pub placed: Color,    // Sorted positions
    pub visited: Color,   // Traversal order
    pub structure: Color, // Node and slot labels
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    number: Color::Rgb(250, 179, 135),         // Orange for values
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for bars
    compared: Color::Rgb(249, 226, 175),       // Yellow
    placed: Color::Rgb(166, 227, 161),         // Green
    visited: Color::Rgb(245, 194, 231),        // Pink
    structure: Color::Rgb(148, 226, 213),      // Teal
};

impl Default for Theme {
    fn default() -> Self {
        DEFAULT_THEME
    }
}
