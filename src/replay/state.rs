//! Structural state rebuilt from trace events
//!
//! [`ReplayState::apply`] folds one event at a time. Events whose operand
//! count does not match their action, that point outside the array, or that
//! would pop an empty structure are skipped and leave the state untouched.

use crate::structures::{BinaryTree, Graph, Side};
use crate::trace::{Action, Subject, SubjectKind, Trace, TraceEvent};

/// Which traversal produced the current visit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Bfs(i64),
    Dfs(i64),
    Tree,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayState {
    kind: SubjectKind,
    /// Working copy of the subject array; only sort events change it.
    pub array: Vec<i64>,
    /// Positions marked as finally placed.
    pub sorted: Vec<bool>,
    /// Array positions touched by the latest event.
    pub highlight: Vec<usize>,
    pub stack: Vec<i64>,
    /// Every value ever enqueued; the live window starts at `front`.
    pub queue_slots: Vec<i64>,
    pub front: usize,
    pub tree: BinaryTree,
    pub graph: Graph,
    /// Node values visited by the traversal in progress.
    pub visited: Vec<i64>,
    pub traversal: Option<Traversal>,
    /// Node value or stack slot singled out by the latest event.
    pub focus: Option<i64>,
    applied: usize,
    skipped: usize,
    last_action: Option<Action>,
}

impl ReplayState {
    pub fn new(subject: &Subject) -> Self {
        Self {
            kind: subject.kind,
            array: subject.initial.clone(),
            sorted: vec![false; subject.initial.len()],
            highlight: Vec::new(),
            stack: Vec::new(),
            queue_slots: Vec::new(),
            front: 0,
            tree: BinaryTree::new(),
            graph: Graph::new(),
            visited: Vec::new(),
            traversal: None,
            focus: None,
            applied: 0,
            skipped: 0,
            last_action: None,
        }
    }

    pub fn kind(&self) -> SubjectKind {
        self.kind
    }

    /// Events folded into this state so far, skipped ones included.
    pub fn position(&self) -> usize {
        self.applied + self.skipped
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Live queue contents, front first.
    pub fn queue(&self) -> &[i64] {
        self.queue_slots.get(self.front..).unwrap_or(&[])
    }

    /// Slot index of the queue front and rear, if non-empty.
    pub fn queue_window(&self) -> Option<(usize, usize)> {
        (self.front < self.queue_slots.len()).then(|| (self.front, self.queue_slots.len() - 1))
    }

    pub fn stack_top(&self) -> Option<i64> {
        self.stack.last().copied()
    }

    /// Fold one event. Returns `false` if it was skipped.
    pub fn apply(&mut self, event: &TraceEvent) -> bool {
        self.highlight.clear();
        self.focus = None;
        let applied = event.is_well_formed() && self.apply_well_formed(event);
        if applied {
            self.applied += 1;
            self.last_action = Some(event.action.clone());
        } else {
            self.skipped += 1;
        }
        applied
    }

    fn apply_well_formed(&mut self, event: &TraceEvent) -> bool {
        let n = self.array.len();
        let in_range = |i: usize| i < n;
        match event.action {
            Action::Compare | Action::NoSwap => {
                let positions: Option<Vec<usize>> =
                    (0..event.operands.len()).map(|i| event.index(i)).collect();
                match positions {
                    Some(p) if p.iter().all(|&i| in_range(i)) => {
                        self.highlight = p;
                        true
                    }
                    _ => false,
                }
            }
            Action::Swap => match event.pair() {
                Some((i, j)) if in_range(i) && in_range(j) => {
                    self.array.swap(i, j);
                    self.highlight = vec![i, j];
                    true
                }
                _ => false,
            },
            Action::MarkSorted => match event.index(0) {
                Some(i) if in_range(i) => {
                    self.sorted[i] = true;
                    self.highlight = vec![i];
                    true
                }
                _ => false,
            },
            Action::Push => {
                let value = event.operands[1];
                self.stack.push(value);
                self.focus = Some(value);
                true
            }
            Action::Pop => match self.stack.pop() {
                Some(value) => {
                    self.focus = Some(value);
                    true
                }
                None => false,
            },
            Action::Peek => match self.stack.last() {
                Some(&value) => {
                    self.focus = Some(value);
                    true
                }
                None => false,
            },
            Action::Enqueue => {
                let value = event.operands[1];
                self.queue_slots.push(value);
                self.focus = Some(value);
                true
            }
            Action::Dequeue => {
                if self.front < self.queue_slots.len() {
                    self.focus = Some(self.queue_slots[self.front]);
                    self.front += 1;
                    true
                } else {
                    false
                }
            }
            Action::Insert => {
                let value = event.operands[0];
                let parent = match event.operands[1] {
                    -1 => None,
                    parent => match Side::from_flag(event.operands[2]) {
                        Some(side) => Some((parent, side)),
                        None => return false,
                    },
                };
                let attached = self.tree.attach(value, parent).is_some();
                if attached {
                    self.focus = Some(value);
                }
                attached
            }
            Action::Visit => {
                let value = event.operands[0];
                let continuing = matches!(
                    self.last_action,
                    Some(Action::Visit | Action::BfsStart | Action::DfsStart)
                );
                if !continuing {
                    self.visited.clear();
                    self.traversal = Some(Traversal::Tree);
                }
                self.visited.push(value);
                self.focus = Some(value);
                true
            }
            Action::AddNode => {
                self.graph.add_node(event.operands[0]);
                self.focus = Some(event.operands[0]);
                true
            }
            Action::AddEdge => {
                self.graph.add_edge(event.operands[0], event.operands[1]);
                true
            }
            Action::BfsStart | Action::DfsStart => {
                let start = event.operands[0];
                self.visited.clear();
                self.traversal = Some(if event.action == Action::BfsStart {
                    Traversal::Bfs(start)
                } else {
                    Traversal::Dfs(start)
                });
                self.focus = Some(start);
                true
            }
            Action::Unknown(_) => false,
        }
    }
}

/// Rebuild the state after the first `prefix` events from scratch.
pub fn reconstruct(trace: &Trace, prefix: usize) -> ReplayState {
    let mut state = ReplayState::new(trace.subject());
    for event in trace.events().iter().take(prefix) {
        state.apply(event);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TraceBuilder;

    fn trace(kind: SubjectKind, initial: Vec<i64>, events: &[(Action, &[i64])]) -> Trace {
        let mut builder = TraceBuilder::new(Subject::new(kind, initial));
        for (action, operands) in events {
            builder.emit(action.clone(), operands);
        }
        builder.finish()
    }

    #[test]
    fn test_swap_and_mark() {
        let t = trace(
            SubjectKind::BubbleSort,
            vec![2, 1],
            &[(Action::Swap, &[0, 1]), (Action::MarkSorted, &[1])],
        );
        let state = reconstruct(&t, 2);
        assert_eq!(state.array, vec![1, 2]);
        assert_eq!(state.sorted, vec![false, true]);
        assert_eq!(state.highlight, vec![1]);
    }

    #[test]
    fn test_out_of_range_and_malformed_are_skipped() {
        let t = trace(
            SubjectKind::BubbleSort,
            vec![2, 1],
            &[
                (Action::Swap, &[0, 7]),
                (Action::Swap, &[0]),
                (Action::Unknown("spin".into()), &[]),
                (Action::Compare, &[-1, 0]),
            ],
        );
        let state = reconstruct(&t, t.len());
        assert_eq!(state.array, vec![2, 1]);
        assert_eq!(state.skipped(), 4);
        assert_eq!(state.position(), 4);
    }

    #[test]
    fn test_stack_and_queue_windows() {
        let t = trace(
            SubjectKind::QueueOps,
            vec![5, 3, 8, 4, 2],
            &[
                (Action::Enqueue, &[0, 10]),
                (Action::Enqueue, &[1, 20]),
                (Action::Dequeue, &[0, 10]),
                (Action::Pop, &[0, 1]),
            ],
        );
        let state = reconstruct(&t, t.len());
        assert_eq!(state.queue(), &[20]);
        assert_eq!(state.queue_window(), Some((1, 1)));
        assert!(state.stack.is_empty());
        assert_eq!(state.skipped(), 1);
    }

    #[test]
    fn test_tree_rebuilt_from_parent_values() {
        let t = trace(
            SubjectKind::TreeOps,
            vec![5, 3, 8],
            &[
                (Action::Insert, &[5, -1, -1, 0]),
                (Action::Insert, &[3, 5, 1, 0]),
                (Action::Insert, &[8, 5, 0, 0]),
                (Action::Visit, &[3]),
                (Action::Visit, &[5]),
            ],
        );
        let state = reconstruct(&t, t.len());
        assert_eq!(state.tree.traverse(crate::structures::Order::Pre), vec![5, 3, 8]);
        assert_eq!(state.visited, vec![3, 5]);
        assert_eq!(state.traversal, Some(Traversal::Tree));
    }

    #[test]
    fn test_new_traversal_resets_visits() {
        let t = trace(
            SubjectKind::GraphOps,
            vec![],
            &[
                (Action::AddEdge, &[0, 1]),
                (Action::BfsStart, &[0]),
                (Action::Visit, &[0]),
                (Action::Visit, &[1]),
                (Action::DfsStart, &[1]),
                (Action::Visit, &[1]),
            ],
        );
        let state = reconstruct(&t, t.len());
        assert_eq!(state.visited, vec![1]);
        assert_eq!(state.traversal, Some(Traversal::Dfs(1)));
        assert_eq!(state.graph.edge_count(), 1);
    }
}
