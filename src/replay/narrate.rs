//! Human-readable descriptions of player steps
//!
//! Step narration reads operand values from a [`Before`] captured just
//! before the event is applied and step numbers from the counters *after*
//! it is recorded.

use super::counters::Counters;
use super::state::ReplayState;
use crate::trace::{Action, SubjectKind, TraceEvent};

/// A heading plus detail lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Narration {
    pub title: String,
    pub details: Vec<String>,
}

impl Narration {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            details: Vec::new(),
        }
    }

    fn line(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }
}

fn label(kind: SubjectKind) -> &'static str {
    match kind {
        SubjectKind::BubbleSort => "BUBBLE SORT",
        SubjectKind::InsertionSort => "INSERTION SORT",
        SubjectKind::SelectionSort => "SELECTION SORT",
        SubjectKind::MergeSort => "MERGE SORT",
        SubjectKind::QuickSort => "QUICK SORT",
        SubjectKind::StackOps => "STACK",
        SubjectKind::QueueOps => "QUEUE",
        SubjectKind::TreeOps => "BINARY TREE",
        SubjectKind::GraphOps => "GRAPH",
    }
}

/// The slice of replay state an event's narration reads, taken before the
/// event is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Before {
    kind: SubjectKind,
    /// Array values at the positions the event names.
    slots: Vec<(usize, i64)>,
    stack_top: Option<i64>,
}

impl Before {
    pub fn capture(state: &ReplayState, event: &TraceEvent) -> Self {
        let slots = (0..event.operands.len())
            .filter_map(|k| event.index(k))
            .filter_map(|i| state.array.get(i).map(|&v| (i, v)))
            .collect();
        Self {
            kind: state.kind(),
            slots,
            stack_top: state.stack_top(),
        }
    }

    fn value(&self, i: usize) -> i64 {
        self.slots
            .iter()
            .find(|(slot, _)| *slot == i)
            .map(|&(_, v)| v)
            .unwrap_or_default()
    }
}

fn list(values: &[i64]) -> String {
    let items: Vec<String> = values.iter().map(i64::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Describe `event` given what the state looked like before it.
pub fn narrate(before: &Before, counters: &Counters, event: &TraceEvent) -> Narration {
    let kind = before.kind;
    match event.action {
        Action::Compare | Action::Swap | Action::NoSwap | Action::MarkSorted => {
            sort_step(kind, before, counters, event)
        }
        _ => structure_step(before, event),
    }
}

fn sort_step(
    kind: SubjectKind,
    before: &Before,
    counters: &Counters,
    event: &TraceEvent,
) -> Narration {
    let name = label(kind);
    let v = |i: usize| before.value(i);

    if event.action == Action::NoSwap {
        return Narration::new(format!("[No Swap] {name}"))
            .line("Elements are already in correct order");
    }

    if event.action == Action::MarkSorted {
        let idx = event.index(0).unwrap_or_default();
        return match kind {
            SubjectKind::BubbleSort => {
                Narration::new(format!("[Pass {} Complete] {name}", counters.passes))
                    .line(format!(
                        "Element at position {idx} ({}) is now in final sorted position",
                        v(idx)
                    ))
                    .line("Largest unsorted element has 'bubbled' to the right")
            }
            SubjectKind::InsertionSort => Narration::new(format!("[Insertion Complete] {name}"))
                .line(format!(
                    "Element at position {idx} ({}) is now in sorted position",
                    v(idx)
                ))
                .line(format!("Left portion [0..{idx}] is now sorted")),
            SubjectKind::SelectionSort => {
                Narration::new(format!("[Pass {} Complete] {name}", counters.passes))
                    .line(format!(
                        "Position {idx} ({}) now contains the minimum element",
                        v(idx)
                    ))
                    .line(format!("Elements [0..{idx}] are in final sorted positions"))
            }
            SubjectKind::QuickSort => Narration::new(format!("[Partition Complete] {name}"))
                .line(format!(
                    "Pivot at position {idx} ({}) is in final position",
                    v(idx)
                ))
                .line("Elements left of pivot are smaller, right are larger"),
            _ => Narration::new(format!("[Merge Complete] {name}"))
                .line(format!("Subarray containing position {idx} is now sorted")),
        };
    }

    let Some((i, j)) = event.pair() else {
        // Single-operand compare: the pivot marker.
        let p = event.index(0).unwrap_or_default();
        return Narration::new(format!("[Pivot] {name} - Selecting pivot"))
            .line(format!("Pivot element: {} (position {p})", v(p)));
    };

    if event.action == Action::Compare {
        let step = counters.comparisons;
        return match kind {
            SubjectKind::BubbleSort => {
                Narration::new(format!("[Step {step}] {name} - Comparing adjacent elements"))
                    .line(format!("Position {i} ({}) vs Position {j} ({})", v(i), v(j)))
                    .line(if v(i) > v(j) {
                        "Out of order: Swap needed!"
                    } else {
                        "In order: No swap needed"
                    })
            }
            SubjectKind::InsertionSort => {
                let (other, key) = (i.min(j), i.max(j));
                Narration::new(format!(
                    "[Step {step}] {name} - Comparing key with sorted portion"
                ))
                .line(format!("Key element: {} (position {key})", v(key)))
                .line(format!("Comparing with: {} (position {other})", v(other)))
                .line(if v(other) > v(key) {
                    "Key is smaller: Need to shift"
                } else {
                    "Key is larger: Insert here"
                })
            }
            SubjectKind::SelectionSort => {
                Narration::new(format!("[Step {step}] {name} - Finding minimum"))
                    .line(format!("Current minimum: {} (position {i})", v(i)))
                    .line(format!("Comparing with: {} (position {j})", v(j)))
                    .line(if v(j) < v(i) {
                        "New minimum found!"
                    } else {
                        "Current minimum is smaller"
                    })
            }
            SubjectKind::MergeSort => {
                Narration::new(format!("[Step {step}] {name} - Merging two sorted subarrays"))
                    .line(format!("Left subarray element: {} (position {i})", v(i)))
                    .line(format!("Right subarray element: {} (position {j})", v(j)))
                    .line(if v(i) <= v(j) {
                        "Taking from left subarray"
                    } else {
                        "Taking from right subarray"
                    })
            }
            _ => Narration::new(format!("[Step {step}] {name} - Partitioning"))
                .line(format!("Pivot element: {} (position {j})", v(j)))
                .line(format!("Comparing with: {} (position {i})", v(i)))
                .line(if v(i) <= v(j) {
                    "Element <= pivot: Move to left"
                } else {
                    "Element > pivot: Move to right"
                }),
        };
    }

    let swap = counters.swaps;
    match kind {
        SubjectKind::BubbleSort => {
            Narration::new(format!("[Swap #{swap}] {name} - Swapping elements"))
                .line(format!(
                    "Swapping {} (pos {i}) and {} (pos {j})",
                    v(i),
                    v(j)
                ))
                .line(format!(
                    "Reason: {} > {} (larger element moves right)",
                    v(i),
                    v(j)
                ))
        }
        SubjectKind::InsertionSort => {
            Narration::new(format!("[Shift #{swap}] {name} - Shifting elements"))
                .line(format!("Shifting {} from position {i} to position {j}", v(i)))
        }
        SubjectKind::SelectionSort => {
            Narration::new(format!("[Swap #{swap}] {name} - Placing minimum"))
                .line(format!(
                    "Swapping minimum {} (pos {j}) with element at position {i}",
                    v(j)
                ))
                .line("Minimum element placed in its correct position")
        }
        SubjectKind::MergeSort => Narration::new(format!("[Merge Step] {name} - Merging elements"))
            .line("Combining elements from two sorted halves"),
        _ => Narration::new(format!("[Swap #{swap}] {name} - Partitioning swap"))
            .line(format!("Swapping elements at positions {i} and {j}"))
            .line("Positioning elements relative to pivot"),
    }
}

fn structure_step(before: &Before, event: &TraceEvent) -> Narration {
    let op = |i: usize| event.operand(i).unwrap_or_default();
    match event.action {
        Action::Push => Narration::new("[PUSH] Stack Operation")
            .line(format!("Pushing {} onto stack (position {})", op(1), op(0))),
        Action::Pop => Narration::new("[POP] Stack Operation").line(format!(
            "Popping {} from stack (was at position {})",
            op(1),
            op(0)
        )),
        Action::Peek => {
            let peek = Narration::new("[PEEK] Stack Operation")
                .line(format!("Top element is at position {}", op(0)));
            match before.stack_top {
                Some(top) => peek.line(format!("Top value: {top}")),
                None => peek,
            }
        }
        Action::Enqueue => Narration::new("[ENQUEUE] Queue Operation")
            .line(format!("Adding {} to rear of queue", op(1))),
        Action::Dequeue => Narration::new("[DEQUEUE] Queue Operation")
            .line(format!("Removing {} from front of queue", op(1))),
        Action::Insert => {
            let insert = Narration::new("[INSERT] Tree Operation");
            if op(1) == -1 {
                insert.line(format!("Inserting {} as root node", op(0)))
            } else {
                let side = if op(2) == 1 { "left" } else { "right" };
                insert.line(format!(
                    "Inserting {} as {side} child of {}",
                    op(0),
                    op(1)
                ))
            }
        }
        Action::Visit => Narration::new("[VISIT] Tree Traversal")
            .line(format!("Visiting node with value {}", op(0))),
        Action::AddNode => Narration::new("[ADD_NODE] Graph Operation")
            .line(format!("Adding node {} to graph", op(0))),
        Action::AddEdge => Narration::new("[ADD_EDGE] Graph Operation").line(format!(
            "Adding edge from node {} to node {}",
            op(0),
            op(1)
        )),
        Action::BfsStart => Narration::new("[BFS] Graph Traversal")
            .line(format!("Starting from node {}", op(0))),
        Action::DfsStart => Narration::new("[DFS] Graph Traversal")
            .line(format!("Starting from node {}", op(0))),
        _ => skipped(event),
    }
}

/// Shown for an event the replay state rejected.
pub fn skipped(event: &TraceEvent) -> Narration {
    Narration::new(format!("[Skipped] {event}"))
        .line("Event does not apply to the current state and was ignored")
}

/// What the player shows before the first step.
pub fn overview(kind: SubjectKind) -> Narration {
    let title = match kind {
        SubjectKind::StackOps => "Stack Overview",
        SubjectKind::QueueOps => "Queue Overview",
        SubjectKind::TreeOps => "Binary Tree Overview",
        SubjectKind::GraphOps => "Graph Overview",
        _ => "Algorithm Overview",
    };
    let lines: &[&str] = match kind {
        SubjectKind::BubbleSort => &[
            "Bubble Sort: Repeatedly compares adjacent elements and swaps if out of order",
            "Each pass moves the largest unsorted element to its correct position",
            "Continues until no more swaps are needed",
            "Time Complexity: O(n²) | Space Complexity: O(1)",
        ],
        SubjectKind::InsertionSort => &[
            "Insertion Sort: Builds sorted array one element at a time",
            "Takes each element and inserts it into correct position in sorted portion",
            "Efficient for small arrays or nearly sorted data",
            "Time Complexity: O(n²) | Space Complexity: O(1)",
        ],
        SubjectKind::SelectionSort => &[
            "Selection Sort: Finds minimum element and places it at beginning",
            "Divides array into sorted and unsorted portions",
            "Repeatedly selects minimum from unsorted portion",
            "Time Complexity: O(n²) | Space Complexity: O(1)",
        ],
        SubjectKind::MergeSort => &[
            "Merge Sort: Divide and conquer algorithm",
            "Divides array into halves, sorts each half, then merges them",
            "Stable and has guaranteed O(n log n) time complexity",
            "Time Complexity: O(n log n) | Space Complexity: O(n)",
        ],
        SubjectKind::QuickSort => &[
            "Quick Sort: Divide and conquer with pivot-based partitioning",
            "Selects pivot, partitions array around pivot, recursively sorts partitions",
            "Average case O(n log n), efficient in practice",
            "Time Complexity: O(n log n) avg, O(n²) worst | Space Complexity: O(log n)",
        ],
        SubjectKind::StackOps => &[
            "LIFO (Last In First Out)",
            "Time Complexities: Push O(1), Pop O(1), Peek O(1), Search O(n)",
        ],
        SubjectKind::QueueOps => &[
            "FIFO (First In First Out)",
            "Time Complexities: Enqueue O(1), Dequeue O(1), Find O(n), Peek O(1)",
        ],
        SubjectKind::TreeOps => &[
            "Operations supported: Insert, Traversals (Inorder/Preorder/Postorder)",
            "Time Complexities (BST avg): Insertion O(log n), Search O(log n), Traversal O(n)",
        ],
        SubjectKind::GraphOps => &[
            "Nodes and Edges; Traversals like BFS/DFS",
            "Time Complexities: Add Node O(1), Add Edge O(1), BFS/DFS O(V+E)",
        ],
    };
    lines
        .iter()
        .fold(Narration::new(title), |n, line| n.line(*line))
}

/// What the player shows once every event has been shown.
pub fn summary(state: &ReplayState, counters: &Counters) -> Narration {
    let kind = state.kind();
    match kind {
        SubjectKind::StackOps => {
            let n = Narration::new("Final Stack State - All Operations Complete")
                .line(format!("Total Push Operations: {}", counters.pushes))
                .line(format!("Total Pop Operations: {}", counters.pops))
                .line(format!("Total Operations: {}", counters.pushes + counters.pops))
                .line("[SUCCESS] Stack operations completed successfully!");
            match state.stack_top() {
                Some(top) => n
                    .line(format!("Current stack size: {}", state.stack.len()))
                    .line(format!("Top element: {top}")),
                None => n.line("Stack is currently empty"),
            }
        }
        SubjectKind::QueueOps => {
            let n = Narration::new("Final Queue State - All Operations Complete")
                .line(format!("Total Enqueue Operations: {}", counters.enqueues))
                .line(format!("Total Dequeue Operations: {}", counters.dequeues))
                .line(format!(
                    "Total Operations: {}",
                    counters.enqueues + counters.dequeues
                ))
                .line("[SUCCESS] Queue operations completed successfully!");
            match (state.queue().first(), state.queue().last()) {
                (Some(front), Some(rear)) => n
                    .line(format!("Current queue size: {}", state.queue().len()))
                    .line(format!("Front element: {front}"))
                    .line(format!("Rear element: {rear}")),
                _ => n.line("Queue is currently empty"),
            }
        }
        SubjectKind::TreeOps => {
            let n = Narration::new("Final Tree Structure - All Operations Complete")
                .line(format!("Total Insert Operations: {}", counters.inserts))
                .line(format!("Total Visit Operations: {}", counters.visits))
                .line(format!(
                    "Total Operations: {}",
                    counters.inserts + counters.visits
                ))
                .line("[SUCCESS] Tree operations completed successfully!");
            match state.tree.root().and_then(|id| state.tree.value(id)) {
                Some(root) => n
                    .line(format!("Total nodes in tree: {}", state.tree.len()))
                    .line(format!("Root node value: {root}"))
                    .line(format!("Height of tree: {}", state.tree.height())),
                None => n.line("Tree is currently empty"),
            }
        }
        SubjectKind::GraphOps => {
            let n = Narration::new("Final Graph State - All Operations Complete")
                .line(format!("Total Nodes Added: {}", counters.nodes))
                .line(format!("Total Edges Added: {}", counters.edges))
                .line(format!("Total Operations: {}", counters.nodes + counters.edges))
                .line("[SUCCESS] Graph operations completed successfully!");
            if state.graph.node_count() == 0 && state.graph.edge_count() == 0 {
                n.line("Graph is currently empty")
            } else {
                n.line(format!("Total vertices: {}", state.graph.node_count()))
                    .line(format!("Total edges: {}", state.graph.edge_count()))
            }
        }
        _ => Narration::new(format!(
            "Final Sorted Array - {} Complete",
            kind.display_name()
        ))
        .line(format!("Array: {}", list(&state.array)))
        .line(format!("Total Comparisons: {}", counters.comparisons))
        .line(format!("Total Swaps: {}", counters.swaps))
        .line(format!("Total Passes: {}", counters.passes))
        .line("[SUCCESS] Algorithm completed successfully!"),
    }
}
