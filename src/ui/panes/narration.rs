//! Narration pane: what the current step did and why

use super::utils::pane_block;
use crate::replay::Narration;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Padding, Paragraph, Wrap},
    Frame,
};

pub fn narration_lines(narration: &Narration) -> Vec<Line<'static>> {
    let title_color = if narration.title.starts_with("[Skipped]") {
        DEFAULT_THEME.error
    } else if narration.title.starts_with("Final") {
        DEFAULT_THEME.success
    } else {
        DEFAULT_THEME.primary
    };

    let mut lines = vec![
        Line::styled(
            narration.title.clone(),
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        ),
        Line::default(),
    ];
    for detail in &narration.details {
        let style = if detail.starts_with("[SUCCESS]") {
            Style::default().fg(DEFAULT_THEME.success)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        lines.push(Line::from(vec![
            Span::styled("-> ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(detail.clone(), style),
        ]));
    }
    lines
}

/// Render the narration pane
pub fn render_narration_pane(
    frame: &mut Frame,
    area: Rect,
    narration: &Narration,
    is_focused: bool,
) {
    let block = pane_block("Step", is_focused).padding(Padding::new(1, 1, 0, 0));
    let paragraph = Paragraph::new(narration_lines(narration))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
