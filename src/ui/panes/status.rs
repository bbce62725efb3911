//! Status bar rendering with keybindings and playback indicators

use crate::replay::PlayerState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Text of the step badge: `Step i/n` counting from one.
pub fn step_label(state: PlayerState, total: usize) -> String {
    match state {
        PlayerState::Init => format!(" Step 0/{} ", total),
        PlayerState::ShowingStep(i) => format!(" Step {}/{} ", i + 1, total),
        PlayerState::Finished | PlayerState::Cancelled => format!(" Step {}/{} ", total, total),
    }
}

pub fn status_message(state: PlayerState) -> &'static str {
    match state {
        PlayerState::Init => "Press any key to start",
        PlayerState::ShowingStep(_) => "Press any key to continue... (or Ctrl+C to exit)",
        PlayerState::Finished => "Playback complete, press any key to exit",
        PlayerState::Cancelled => "[Interrupted] Exiting visualization...",
    }
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: PlayerState, total: usize) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left_spans = vec![
        Span::styled(
            step_label(state, total),
            Style::default()
                .bg(if state == PlayerState::Cancelled {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", status_message(state)),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = vec![
        Span::styled(" any key ", key_style),
        Span::styled(" next ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" q / Esc / ^C ", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let badge = match state {
        PlayerState::Init => Some((" START ", DEFAULT_THEME.success)),
        PlayerState::ShowingStep(_) => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
        PlayerState::Finished => Some((" END ", DEFAULT_THEME.error)),
        PlayerState::Cancelled => None,
    };
    if let Some((text, bg)) = badge {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_label_counts_from_one() {
        assert_eq!(step_label(PlayerState::Init, 7), " Step 0/7 ");
        assert_eq!(step_label(PlayerState::ShowingStep(0), 7), " Step 1/7 ");
        assert_eq!(step_label(PlayerState::Finished, 7), " Step 7/7 ");
    }
}
