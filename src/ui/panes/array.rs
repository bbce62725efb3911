//! Array grid for the sort subjects
//!
//! Values are laid out in fixed-width cells that wrap to the pane width,
//! each row of values followed by its row of positions.

use super::utils::{badge, muted, pane_block};
use crate::replay::ReplayState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

fn cell_width(values: &[i64]) -> usize {
    let widest = values
        .iter()
        .map(|v| v.to_string().len())
        .chain(std::iter::once(values.len().saturating_sub(1).to_string().len()))
        .max()
        .unwrap_or(1);
    widest + 2
}

pub fn array_lines(state: &ReplayState, width: u16) -> Vec<Line<'static>> {
    let values = &state.array;
    if values.is_empty() {
        return vec![Line::styled("(empty array)", muted())];
    }

    let cell = cell_width(values);
    let per_row = (usize::from(width) / cell).max(1);
    let mut lines = Vec::new();

    for (row, chunk) in values.chunks(per_row).enumerate() {
        let base = row * per_row;
        let mut cells = Vec::with_capacity(chunk.len());
        let mut positions = Vec::with_capacity(chunk.len());
        for (offset, value) in chunk.iter().enumerate() {
            let i = base + offset;
            let style = if state.highlight.contains(&i) {
                badge(DEFAULT_THEME.compared)
            } else if state.sorted.get(i).copied().unwrap_or(false) {
                Style::default()
                    .fg(DEFAULT_THEME.placed)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.number)
            };
            cells.push(Span::styled(format!("{:^cell$}", value), style));
            positions.push(Span::styled(format!("{:^cell$}", i), muted()));
        }
        lines.push(Line::from(cells));
        lines.push(Line::from(positions));
        lines.push(Line::default());
    }

    let placed = state.sorted.iter().filter(|s| **s).count();
    lines.push(Line::from(vec![
        Span::styled("Sorted positions: ", muted()),
        Span::styled(
            format!("{}/{}", placed, values.len()),
            Style::default().fg(DEFAULT_THEME.placed),
        ),
    ]));
    lines
}

/// Render the array pane
pub fn render_array_pane(frame: &mut Frame, area: Rect, state: &ReplayState, is_focused: bool) {
    let block = pane_block("Array", is_focused);
    let inner_width = area.width.saturating_sub(2);
    let paragraph = Paragraph::new(array_lines(state, inner_width))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{Subject, SubjectKind};

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_cells_wrap_to_width() {
        let state = ReplayState::new(&Subject::new(SubjectKind::BubbleSort, vec![5, 3, 8, 4, 2]));
        // Three-wide cells, two per row.
        let lines = text(&array_lines(&state, 6));
        assert_eq!(lines[0], " 5  3 ");
        assert_eq!(lines[1], " 0  1 ");
        assert_eq!(lines.len(), 3 * 3 + 1);
    }

    #[test]
    fn test_empty_array() {
        let mut state = ReplayState::new(&Subject::new(SubjectKind::BubbleSort, vec![1]));
        state.array.clear();
        state.sorted.clear();
        assert_eq!(text(&array_lines(&state, 40)), vec!["(empty array)"]);
    }
}
