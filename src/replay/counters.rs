// Running tallies shown in the player header

use crate::trace::{Action, SubjectKind, TraceEvent};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    pub comparisons: usize,
    pub swaps: usize,
    pub passes: usize,
    pub pushes: usize,
    pub pops: usize,
    pub peeks: usize,
    pub enqueues: usize,
    pub dequeues: usize,
    pub inserts: usize,
    pub visits: usize,
    pub nodes: usize,
    pub edges: usize,
}

impl Counters {
    /// Count an event that the replay state accepted.
    pub fn record(&mut self, kind: SubjectKind, event: &TraceEvent) {
        match event.action {
            // A lone pivot marker is not a comparison.
            Action::Compare if event.operands.len() >= 2 => self.comparisons += 1,
            Action::Swap => self.swaps += 1,
            Action::MarkSorted
                if matches!(kind, SubjectKind::BubbleSort | SubjectKind::SelectionSort) =>
            {
                self.passes += 1
            }
            Action::Push => self.pushes += 1,
            Action::Pop => self.pops += 1,
            Action::Peek => self.peeks += 1,
            Action::Enqueue => self.enqueues += 1,
            Action::Dequeue => self.dequeues += 1,
            Action::Insert => self.inserts += 1,
            Action::Visit => self.visits += 1,
            Action::AddNode => self.nodes += 1,
            Action::AddEdge => self.edges += 1,
            _ => {}
        }
    }

    /// Header line for the given subject.
    pub fn headline(&self, kind: SubjectKind) -> String {
        match kind {
            SubjectKind::StackOps => format!(
                "Push: {} | Pop: {} | Total: {}",
                self.pushes,
                self.pops,
                self.pushes + self.pops + self.peeks
            ),
            SubjectKind::QueueOps => format!(
                "Enqueue: {} | Dequeue: {} | Total: {}",
                self.enqueues,
                self.dequeues,
                self.enqueues + self.dequeues
            ),
            SubjectKind::TreeOps => format!(
                "Inserts: {} | Visits: {} | Total: {}",
                self.inserts,
                self.visits,
                self.inserts + self.visits
            ),
            SubjectKind::GraphOps => format!(
                "Nodes: {} | Edges: {} | Visits: {}",
                self.nodes, self.edges, self.visits
            ),
            _ => format!(
                "Comparisons: {} | Swaps: {} | Pass: {}",
                self.comparisons, self.swaps, self.passes
            ),
        }
    }
}
