//! Execution trace (IR)
//!
//! A [`Trace`] is the subject being visualized plus the ordered list of
//! [`TraceEvent`]s the generator emitted for it. Traces are built once
//! through a [`TraceBuilder`] and are read-only afterwards; both replay
//! engines consume them strictly in order.
//!
//! - [`event`]: the action vocabulary and per-action arity
//! - [`codec`]: the text format shared by the generator and the consumers

pub mod codec;
pub mod cursor;
pub mod event;

pub use event::{Action, TraceEvent};

use tracing::warn;

/// Longest initial array a subject may carry.
pub const MAX_SUBJECT_LEN: usize = 256;

/// Array used when a program declares none.
pub const DEFAULT_ARRAY: [i64; 5] = [5, 3, 8, 4, 2];

/// What the trace describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    BubbleSort,
    InsertionSort,
    SelectionSort,
    MergeSort,
    QuickSort,
    StackOps,
    QueueOps,
    TreeOps,
    GraphOps,
}

impl SubjectKind {
    pub const ALL: [SubjectKind; 9] = [
        SubjectKind::BubbleSort,
        SubjectKind::InsertionSort,
        SubjectKind::SelectionSort,
        SubjectKind::MergeSort,
        SubjectKind::QuickSort,
        SubjectKind::StackOps,
        SubjectKind::QueueOps,
        SubjectKind::TreeOps,
        SubjectKind::GraphOps,
    ];

    /// Name written to the `algorithm` field of a trace file.
    pub fn display_name(self) -> &'static str {
        match self {
            SubjectKind::BubbleSort => "Bubble Sort",
            SubjectKind::InsertionSort => "Insertion Sort",
            SubjectKind::SelectionSort => "Selection Sort",
            SubjectKind::MergeSort => "Merge Sort",
            SubjectKind::QuickSort => "Quick Sort",
            SubjectKind::StackOps => "Stack Operations",
            SubjectKind::QueueOps => "Queue Operations",
            SubjectKind::TreeOps => "Binary Tree Operations",
            SubjectKind::GraphOps => "Graph Operations",
        }
    }

    /// Map a display name back to a kind.
    ///
    /// Exact names are tried first. Hand-edited files often shorten the
    /// name, so a leading word (`"Bubble"`, `"Stack"`) or any name
    /// containing `"Tree"` is accepted as well.
    pub fn from_display_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Some(kind) = Self::ALL.iter().find(|k| k.display_name() == name) {
            return Some(*kind);
        }
        const PREFIXES: [(&str, SubjectKind); 8] = [
            ("Bubble", SubjectKind::BubbleSort),
            ("Insertion", SubjectKind::InsertionSort),
            ("Selection", SubjectKind::SelectionSort),
            ("Merge", SubjectKind::MergeSort),
            ("Quick", SubjectKind::QuickSort),
            ("Stack", SubjectKind::StackOps),
            ("Queue", SubjectKind::QueueOps),
            ("Graph", SubjectKind::GraphOps),
        ];
        PREFIXES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|(_, kind)| *kind)
            .or_else(|| name.contains("Tree").then_some(SubjectKind::TreeOps))
    }

    pub fn is_sort(self) -> bool {
        matches!(
            self,
            SubjectKind::BubbleSort
                | SubjectKind::InsertionSort
                | SubjectKind::SelectionSort
                | SubjectKind::MergeSort
                | SubjectKind::QuickSort
        )
    }

    /// Sorts whose `swap` events are physical exchanges of array slots.
    pub fn sorts_in_place(self) -> bool {
        self.is_sort() && self != SubjectKind::MergeSort
    }

    /// Trees and graphs are drawn as node/edge diagrams rather than arrays.
    pub fn is_graph_like(self) -> bool {
        matches!(self, SubjectKind::TreeOps | SubjectKind::GraphOps)
    }
}

/// The algorithm or structure a trace describes, with its starting array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub kind: SubjectKind,
    pub initial: Vec<i64>,
}

impl Subject {
    /// Build a subject. An empty array becomes [`DEFAULT_ARRAY`] and arrays
    /// longer than [`MAX_SUBJECT_LEN`] are truncated.
    pub fn new(kind: SubjectKind, mut initial: Vec<i64>) -> Self {
        if initial.is_empty() {
            initial = DEFAULT_ARRAY.to_vec();
        } else if initial.len() > MAX_SUBJECT_LEN {
            warn!(
                len = initial.len(),
                max = MAX_SUBJECT_LEN,
                "initial array truncated"
            );
            initial.truncate(MAX_SUBJECT_LEN);
        }
        Self { kind, initial }
    }

    /// Subject carrying [`DEFAULT_ARRAY`].
    pub fn with_default_array(kind: SubjectKind) -> Self {
        Self::new(kind, DEFAULT_ARRAY.to_vec())
    }
}

/// A complete, immutable execution trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    subject: Subject,
    events: Vec<TraceEvent>,
}

impl Trace {
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn kind(&self) -> SubjectKind {
        self.subject.kind
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn get(&self, position: usize) -> Option<&TraceEvent> {
        self.events.get(position)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events tagged `action`.
    pub fn count(&self, action: &Action) -> usize {
        self.events.iter().filter(|e| &e.action == action).count()
    }
}

/// Append-only accumulator used while generating a trace.
#[derive(Debug)]
pub struct TraceBuilder {
    subject: Subject,
    events: Vec<TraceEvent>,
}

impl TraceBuilder {
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            events: Vec::new(),
        }
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Replace the subject's initial array. Used by tree programs, whose
    /// subject is the list of inserted values.
    pub fn set_initial(&mut self, initial: Vec<i64>) {
        self.subject = Subject::new(self.subject.kind, initial);
    }

    /// Append one event; its position is assigned here.
    pub fn emit(&mut self, action: Action, operands: &[i64]) {
        let position = self.events.len();
        self.events
            .push(TraceEvent::new(action, operands.to_vec(), position));
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn finish(self) -> Trace {
        Trace {
            subject: self.subject,
            events: self.events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_are_unique_and_reversible() {
        for kind in SubjectKind::ALL {
            assert_eq!(SubjectKind::from_display_name(kind.display_name()), Some(kind));
        }
    }

    #[test]
    fn test_display_name_prefix_fallback() {
        assert_eq!(
            SubjectKind::from_display_name("Bubble"),
            Some(SubjectKind::BubbleSort)
        );
        assert_eq!(
            SubjectKind::from_display_name("Tree Ops"),
            Some(SubjectKind::TreeOps)
        );
        assert_eq!(SubjectKind::from_display_name("Heap Sort"), None);
    }

    #[test]
    fn test_subject_truncates_long_arrays() {
        let subject = Subject::new(SubjectKind::BubbleSort, (0..300).collect());
        assert_eq!(subject.initial.len(), MAX_SUBJECT_LEN);
        assert_eq!(subject.initial[255], 255);
    }

    #[test]
    fn test_subject_empty_array_becomes_default() {
        let subject = Subject::new(SubjectKind::InsertionSort, Vec::new());
        assert_eq!(subject.initial, DEFAULT_ARRAY.to_vec());
    }

    #[test]
    fn test_builder_assigns_positions() {
        let mut builder = TraceBuilder::new(Subject::with_default_array(SubjectKind::StackOps));
        builder.emit(Action::Push, &[0, 7]);
        builder.emit(Action::Pop, &[0, 7]);
        let trace = builder.finish();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.events()[1].position, 1);
        assert_eq!(trace.count(&Action::Push), 1);
    }
}
