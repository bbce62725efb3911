// Shared helpers for pane rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus-dependent border colour.
pub fn pane_block(title: &str, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Inverted badge used for the element an event points at.
pub fn badge(bg: Color) -> Style {
    Style::default()
        .bg(bg)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(DEFAULT_THEME.comment)
}

pub fn value_style(is_focus: bool, is_visited: bool) -> Style {
    if is_focus {
        badge(DEFAULT_THEME.compared)
    } else if is_visited {
        Style::default().fg(DEFAULT_THEME.visited)
    } else {
        Style::default().fg(DEFAULT_THEME.number)
    }
}
