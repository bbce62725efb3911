//! Structural models shared by the trace generator and the replay engines.
//!
//! Both are arena-indexed: tree nodes and graph nodes are addressed by
//! stable integers rather than pointers.

pub mod graph;
pub mod tree;

pub use graph::Graph;
pub use tree::{BinaryTree, NodeId, Order, Side};
