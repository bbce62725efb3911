//! Stack pane: slots drawn top-down, newest first

use super::utils::{muted, pane_block, value_style};
use crate::replay::ReplayState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

pub fn stack_lines(state: &ReplayState) -> Vec<Line<'static>> {
    let top = state.stack.len().saturating_sub(1);
    state
        .stack
        .iter()
        .enumerate()
        .rev()
        .map(|(pos, value)| {
            let is_top = pos == top;
            let mut spans = vec![
                Span::styled(format!("[{:>3}] ", pos), muted()),
                Span::styled(
                    format!(" {:^6} ", value),
                    value_style(is_top && state.focus == Some(*value), false),
                ),
            ];
            if is_top {
                spans.push(Span::styled(
                    "  <-- TOP",
                    Style::default()
                        .fg(DEFAULT_THEME.structure)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            Line::from(spans)
        })
        .collect()
}

/// Render the stack pane
pub fn render_stack_pane(frame: &mut Frame, area: Rect, state: &ReplayState, is_focused: bool) {
    let block = pane_block("Stack", is_focused);

    if state.stack.is_empty() {
        let paragraph = Paragraph::new("(empty) <-- TOP").block(block).style(muted());
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    // The top of the stack stays visible; the bottom is clipped.
    let items: Vec<ListItem> = stack_lines(state)
        .into_iter()
        .take(visible_height)
        .map(ListItem::new)
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}
