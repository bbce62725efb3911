//! Undirected graph keyed by integer node ids
//!
//! Edges are kept in insertion order; neighbour lists and traversal orders
//! are derived from that order so the generator and every replay engine
//! agree on them.

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<i64>,
    index: FxHashMap<i64, usize>,
    edges: Vec<(i64, i64)>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns `false` if the id was already present.
    pub fn add_node(&mut self, id: i64) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id, self.nodes.len());
        self.nodes.push(id);
        true
    }

    /// Record the undirected edge `u -- v`. Endpoints need not be nodes yet.
    pub fn add_edge(&mut self, u: i64, v: i64) {
        self.edges.push((u, v));
    }

    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    /// Node ids in the order they were added.
    pub fn nodes(&self) -> &[i64] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(i64, i64)] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Other endpoint of every edge touching `id`, in edge order.
    pub fn neighbors(&self, id: i64) -> impl Iterator<Item = i64> + '_ {
        self.edges.iter().filter_map(move |&(u, v)| {
            if u == id {
                Some(v)
            } else if v == id {
                Some(u)
            } else {
                None
            }
        })
    }

    /// Breadth-first visiting order from `start`, start included.
    pub fn bfs(&self, start: i64) -> Vec<i64> {
        let mut visited = FxHashSet::default();
        let mut order = vec![start];
        let mut queue = VecDeque::from([start]);
        visited.insert(start);
        while let Some(current) = queue.pop_front() {
            for next in self.neighbors(current) {
                if visited.insert(next) {
                    order.push(next);
                    queue.push_back(next);
                }
            }
        }
        order
    }

    /// Depth-first visiting order from `start` using an explicit stack;
    /// neighbours are pushed in edge order, so the last one is explored first.
    pub fn dfs(&self, start: i64) -> Vec<i64> {
        let mut visited = FxHashSet::default();
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            order.push(current);
            stack.extend(self.neighbors(current).filter(|n| !visited.contains(n)));
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Graph {
        let mut g = Graph::new();
        for id in 0..3 {
            g.add_node(id);
        }
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let mut g = Graph::new();
        assert!(g.add_node(4));
        assert!(!g.add_node(4));
        assert_eq!(g.nodes(), &[4]);
    }

    #[test]
    fn test_neighbors_follow_edge_order() {
        let mut g = path();
        g.add_edge(2, 0);
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(g.neighbors(2).collect::<Vec<_>>(), vec![1, 0]);
    }

    #[test]
    fn test_bfs_path() {
        assert_eq!(path().bfs(0), vec![0, 1, 2]);
        assert_eq!(path().bfs(1), vec![1, 0, 2]);
    }

    #[test]
    fn test_dfs_explores_last_pushed_first() {
        let mut g = Graph::new();
        g.add_edge(0, 1);
        g.add_edge(0, 2);
        g.add_edge(1, 3);
        assert_eq!(g.dfs(0), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_traversal_from_isolated_start() {
        let g = path();
        assert_eq!(g.bfs(9), vec![9]);
        assert_eq!(g.dfs(9), vec![9]);
    }
}
