//! Graph pane: adjacency listing plus the traversal in progress

use super::utils::{muted, pane_block, value_style};
use crate::replay::{ReplayState, Traversal};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn graph_lines(state: &ReplayState) -> Vec<Line<'static>> {
    let graph = &state.graph;
    if graph.node_count() == 0 {
        return vec![Line::styled("[EMPTY]", muted())];
    }

    let mut lines: Vec<Line> = graph
        .nodes()
        .iter()
        .map(|&id| {
            let neighbors: Vec<String> = graph.neighbors(id).map(|n| n.to_string()).collect();
            Line::from(vec![
                Span::styled(
                    format!("{:>4}", id),
                    value_style(state.focus == Some(id), state.visited.contains(&id)),
                ),
                Span::styled(" -> ", muted()),
                Span::raw(if neighbors.is_empty() {
                    "(none)".to_string()
                } else {
                    neighbors.join(", ")
                }),
            ])
        })
        .collect();

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Vertices: ", muted()),
        Span::raw(graph.node_count().to_string()),
        Span::styled("  Edges: ", muted()),
        Span::raw(graph.edge_count().to_string()),
    ]));

    let heading = match state.traversal {
        Some(Traversal::Bfs(start)) => Some(format!("BFS from {start}: ")),
        Some(Traversal::Dfs(start)) => Some(format!("DFS from {start}: ")),
        _ => None,
    };
    if let Some(heading) = heading {
        let order: Vec<String> = state.visited.iter().map(i64::to_string).collect();
        lines.push(Line::from(vec![
            Span::styled(
                heading,
                Style::default()
                    .fg(DEFAULT_THEME.structure)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(order.join(" → "), Style::default().fg(DEFAULT_THEME.visited)),
        ]));
    }
    lines
}

/// Render the graph pane
pub fn render_graph_pane(frame: &mut Frame, area: Rect, state: &ReplayState, is_focused: bool) {
    let paragraph = Paragraph::new(graph_lines(state))
        .block(pane_block("Graph", is_focused))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
