//! Queue pane: live window drawn left to right, front first

use super::utils::{muted, pane_block, value_style};
use crate::replay::ReplayState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn queue_lines(state: &ReplayState) -> Vec<Line<'static>> {
    let Some((front, rear)) = state.queue_window() else {
        return vec![Line::styled("FRONT -> (empty) <- REAR", muted())];
    };

    let label = Style::default()
        .fg(DEFAULT_THEME.structure)
        .add_modifier(Modifier::BOLD);
    let mut cells = vec![Span::styled("FRONT -> ", label)];
    let mut slots = vec![Span::raw(" ".repeat(9))];
    for (offset, value) in state.queue().iter().enumerate() {
        let slot = front + offset;
        let is_new = slot == rear && state.focus == Some(*value);
        cells.push(Span::styled(format!("[{:^5}]", value), value_style(is_new, false)));
        slots.push(Span::styled(format!(" {:^5} ", slot), muted()));
    }
    cells.push(Span::styled(" <- REAR", label));

    vec![
        Line::from(cells),
        Line::from(slots),
        Line::default(),
        Line::from(vec![
            Span::styled("Front slot: ", muted()),
            Span::raw(front.to_string()),
            Span::styled("  Rear slot: ", muted()),
            Span::raw(rear.to_string()),
            Span::styled("  Size: ", muted()),
            Span::raw(state.queue().len().to_string()),
        ]),
    ]
}

/// Render the queue pane
pub fn render_queue_pane(frame: &mut Frame, area: Rect, state: &ReplayState, is_focused: bool) {
    let paragraph = Paragraph::new(queue_lines(state))
        .block(pane_block("Queue", is_focused))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
