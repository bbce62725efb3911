//! Tree pane: indented outline, one node per line

use super::utils::{muted, pane_block, value_style};
use crate::replay::ReplayState;
use crate::structures::{BinaryTree, NodeId};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Preorder walk yielding (depth, branch label, node).
fn outline(tree: &BinaryTree) -> Vec<(usize, &'static str, NodeId)> {
    let mut rows = Vec::new();
    let mut pending: Vec<(usize, &'static str, NodeId)> =
        tree.root().map(|r| (0, "root", r)).into_iter().collect();
    while let Some((depth, branch, id)) = pending.pop() {
        rows.push((depth, branch, id));
        if let Some(node) = tree.node(id) {
            // Right first so the left child is printed first.
            if let Some(right) = node.right {
                pending.push((depth + 1, "R", right));
            }
            if let Some(left) = node.left {
                pending.push((depth + 1, "L", left));
            }
        }
    }
    rows
}

pub fn tree_lines(state: &ReplayState) -> Vec<Line<'static>> {
    let tree = &state.tree;
    let mut lines: Vec<Line> = outline(tree)
        .into_iter()
        .filter_map(|(depth, branch, id)| {
            let value = tree.value(id)?;
            let prefix = if depth == 0 {
                String::new()
            } else {
                format!("{}└─ {}: ", "   ".repeat(depth - 1), branch)
            };
            Some(Line::from(vec![
                Span::styled(prefix, muted()),
                Span::styled(
                    value.to_string(),
                    value_style(state.focus == Some(value), state.visited.contains(&value)),
                ),
            ]))
        })
        .collect();

    if !state.visited.is_empty() {
        let order: Vec<String> = state.visited.iter().map(i64::to_string).collect();
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Visited: ", muted()),
            Span::raw(order.join(" → ")),
        ]));
    }
    lines
}

/// Render the tree pane
pub fn render_tree_pane(frame: &mut Frame, area: Rect, state: &ReplayState, is_focused: bool) {
    let block = pane_block("Binary Tree", is_focused);
    if state.tree.is_empty() {
        let paragraph = Paragraph::new("TREE: [EMPTY]").block(block).style(muted());
        frame.render_widget(paragraph, area);
        return;
    }
    let items: Vec<ListItem> = tree_lines(state).into_iter().map(ListItem::new).collect();
    let block = block.padding(Padding::new(1, 0, 0, 0));
    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{Action, Subject, SubjectKind, TraceEvent};

    #[test]
    fn test_outline_left_before_right() {
        let mut state = ReplayState::new(&Subject::with_default_array(SubjectKind::TreeOps));
        for (i, ops) in [[5, -1, -1, 0], [3, 5, 1, 0], [8, 5, 0, 0], [1, 3, 1, 0]]
            .iter()
            .enumerate()
        {
            state.apply(&TraceEvent::new(Action::Insert, ops.to_vec(), i));
        }
        let lines: Vec<String> = tree_lines(&state)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(lines, vec!["5", "└─ L: 3", "   └─ L: 1", "└─ R: 8"]);
    }
}
