//! Structure operation interpreters
//!
//! Operations run against a live model of the structure. Operations on an
//! empty stack or queue are dropped without an event.

use super::validate::{Operation, Structure};
use crate::structures::{BinaryTree, Graph};
use crate::trace::{Action, TraceBuilder};
use std::collections::VecDeque;
use tracing::debug;

pub fn generate(structure: Structure, operations: &[Operation], out: &mut TraceBuilder) {
    match structure {
        Structure::Stack => stack(operations, out),
        Structure::Queue => queue(operations, out),
        Structure::Tree => tree(operations, out),
        Structure::Graph => graph(operations, out),
    }
}

fn top_index(len: usize) -> i64 {
    len as i64 - 1
}

fn stack(operations: &[Operation], out: &mut TraceBuilder) {
    let mut items: Vec<i64> = Vec::new();
    for op in operations {
        match *op {
            Operation::Push(value) => {
                items.push(value);
                out.emit(Action::Push, &[top_index(items.len()), value]);
            }
            Operation::Pop => {
                let top = top_index(items.len());
                match items.pop() {
                    Some(value) => out.emit(Action::Pop, &[top, value]),
                    None => debug!("pop on empty stack dropped"),
                }
            }
            Operation::Peek => {
                if !items.is_empty() {
                    out.emit(Action::Peek, &[top_index(items.len())]);
                }
            }
            _ => {}
        }
    }
}

fn queue(operations: &[Operation], out: &mut TraceBuilder) {
    let mut items: VecDeque<i64> = VecDeque::new();
    // Slot indices only ever grow, like a ring buffer that never wraps.
    let mut front: i64 = 0;
    let mut rear: i64 = -1;
    for op in operations {
        match *op {
            Operation::Enqueue(value) => {
                rear += 1;
                items.push_back(value);
                out.emit(Action::Enqueue, &[rear, value]);
            }
            Operation::Dequeue => match items.pop_front() {
                Some(value) => {
                    out.emit(Action::Dequeue, &[front, value]);
                    front += 1;
                }
                None => debug!("dequeue on empty queue dropped"),
            },
            _ => {}
        }
    }
}

fn tree(operations: &[Operation], out: &mut TraceBuilder) {
    let mut tree = BinaryTree::new();
    let mut inserted = Vec::new();
    for op in operations {
        match *op {
            Operation::Insert(value) => {
                let placement = tree.placement(value);
                let (parent, side) = match placement.parent {
                    Some((id, side)) => (tree.value(id).unwrap_or(-1), side.flag()),
                    None => (-1, -1),
                };
                out.emit(Action::Insert, &[value, parent, side, 0]);
                tree.insert(value);
                inserted.push(value);
            }
            Operation::Traverse(order) => {
                for value in tree.traverse(order) {
                    out.emit(Action::Visit, &[value]);
                }
            }
            _ => {}
        }
    }
    if !inserted.is_empty() {
        out.set_initial(inserted);
    }
}

fn graph(operations: &[Operation], out: &mut TraceBuilder) {
    let mut graph = Graph::new();
    for op in operations {
        match *op {
            Operation::AddNode(id) => {
                graph.add_node(id);
                out.emit(Action::AddNode, &[id]);
            }
            Operation::AddEdge(u, v) => {
                graph.add_edge(u, v);
                out.emit(Action::AddEdge, &[u, v]);
            }
            Operation::Bfs(start) => {
                out.emit(Action::BfsStart, &[start]);
                for id in graph.bfs(start) {
                    out.emit(Action::Visit, &[id]);
                }
            }
            Operation::Dfs(start) => {
                out.emit(Action::DfsStart, &[start]);
                for id in graph.dfs(start) {
                    out.emit(Action::Visit, &[id]);
                }
            }
            _ => {}
        }
    }
}
