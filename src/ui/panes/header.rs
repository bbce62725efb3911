//! Title bar with the subject name and running counters

use crate::replay::Counters;
use crate::trace::SubjectKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_header(frame: &mut Frame, area: Rect, kind: SubjectKind, counters: &Counters) {
    let line = Line::from(vec![
        Span::styled(
            format!("{} Visualization", kind.display_name()),
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(counters.headline(kind), Style::default().fg(DEFAULT_THEME.fg)),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));
    let paragraph = Paragraph::new(line)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
