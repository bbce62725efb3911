//! Trace event vocabulary
//!
//! Every event carries an [`Action`] tag and a short list of integer
//! operands. Operands are positions for the sort actions and values or node
//! ids for the structure actions. Each action has a fixed set of accepted
//! operand counts; consumers skip events outside that set.

use std::fmt;

/// Upper bound on operands per event on the wire.
pub const MAX_OPERANDS: usize = 4;

/// Semantic tag of a trace event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Compare,
    Swap,
    NoSwap,
    MarkSorted,
    Push,
    Pop,
    Peek,
    Enqueue,
    Dequeue,
    Insert,
    Visit,
    AddNode,
    AddEdge,
    BfsStart,
    DfsStart,
    /// An action name read from a file that this build does not know.
    Unknown(String),
}

impl Action {
    /// Wire name of the action.
    pub fn name(&self) -> &str {
        match self {
            Action::Compare => "compare",
            Action::Swap => "swap",
            Action::NoSwap => "no_swap",
            Action::MarkSorted => "mark_sorted",
            Action::Push => "push",
            Action::Pop => "pop",
            Action::Peek => "peek",
            Action::Enqueue => "enqueue",
            Action::Dequeue => "dequeue",
            Action::Insert => "insert",
            Action::Visit => "visit",
            Action::AddNode => "add_node",
            Action::AddEdge => "add_edge",
            Action::BfsStart => "bfs_start",
            Action::DfsStart => "dfs_start",
            Action::Unknown(name) => name,
        }
    }

    /// Parse a wire name. Never fails; unrecognised names become [`Action::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "compare" => Action::Compare,
            "swap" => Action::Swap,
            "no_swap" => Action::NoSwap,
            "mark_sorted" => Action::MarkSorted,
            "push" => Action::Push,
            "pop" => Action::Pop,
            "peek" => Action::Peek,
            "enqueue" => Action::Enqueue,
            "dequeue" => Action::Dequeue,
            "insert" => Action::Insert,
            "visit" => Action::Visit,
            "add_node" => Action::AddNode,
            "add_edge" => Action::AddEdge,
            "bfs_start" => Action::BfsStart,
            "dfs_start" => Action::DfsStart,
            other => Action::Unknown(other.to_string()),
        }
    }

    /// Whether an event with `count` operands is well formed for this action.
    ///
    /// `compare` takes two positions, or a single position when quick sort
    /// marks its pivot. Unknown actions are never well formed.
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Action::Compare => count == 1 || count == 2,
            Action::Swap
            | Action::NoSwap
            | Action::Push
            | Action::Pop
            | Action::Enqueue
            | Action::Dequeue
            | Action::AddEdge => count == 2,
            Action::MarkSorted
            | Action::Peek
            | Action::Visit
            | Action::AddNode
            | Action::BfsStart
            | Action::DfsStart => count == 1,
            Action::Insert => count == 4,
            Action::Unknown(_) => false,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the execution trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    pub action: Action,
    pub operands: Vec<i64>,
    /// Index of this event in its trace.
    pub position: usize,
}

impl TraceEvent {
    pub fn new(action: Action, operands: Vec<i64>, position: usize) -> Self {
        Self {
            action,
            operands,
            position,
        }
    }

    /// True when the operand count matches the action's arity.
    pub fn is_well_formed(&self) -> bool {
        self.action.accepts(self.operands.len())
    }

    pub fn operand(&self, i: usize) -> Option<i64> {
        self.operands.get(i).copied()
    }

    /// Operand `i` as an array position, if present and non-negative.
    pub fn index(&self, i: usize) -> Option<usize> {
        self.operand(i).and_then(|v| usize::try_from(v).ok())
    }

    /// The two leading operands as positions.
    pub fn pair(&self) -> Option<(usize, usize)> {
        Some((self.index(0)?, self.index(1)?))
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.action)?;
        for (i, op) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", op)?;
        }
        write!(f, ")")
    }
}
