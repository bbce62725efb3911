//! Arena-backed binary search tree
//!
//! Nodes live in a `Vec` and refer to each other by [`NodeId`]. Values
//! smaller than a node go left, everything else (duplicates included) goes
//! right.

/// Stable index of a node in its tree's arena.
pub type NodeId = usize;

/// Which child slot of the parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Wire encoding used by `insert` events: 1 for left, 0 for right.
    pub fn flag(self) -> i64 {
        match self {
            Side::Left => 1,
            Side::Right => 0,
        }
    }

    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            1 => Some(Side::Left),
            0 => Some(Side::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub value: i64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

/// Where a new value lands: under `parent` on `side`, or as the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub parent: Option<(NodeId, Side)>,
}

/// Traversal orders supported by the tree operation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    In,
    Pre,
    Post,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryTree {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
}

impl BinaryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn value(&self, id: NodeId) -> Option<i64> {
        self.node(id).map(|n| n.value)
    }

    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let node = &self.nodes[id];
        match side {
            Side::Left => node.left,
            Side::Right => node.right,
        }
    }

    /// Simulate the search-tree descent for `value` without mutating.
    pub fn placement(&self, value: i64) -> Placement {
        let Some(mut current) = self.root else {
            return Placement { parent: None };
        };
        loop {
            let side = if value < self.nodes[current].value {
                Side::Left
            } else {
                Side::Right
            };
            match self.child(current, side) {
                Some(next) => current = next,
                None => {
                    return Placement {
                        parent: Some((current, side)),
                    }
                }
            }
        }
    }

    /// Insert by search-tree order. Returns the new node and where it went.
    pub fn insert(&mut self, value: i64) -> (NodeId, Placement) {
        let placement = self.placement(value);
        let id = self.push_node(value);
        match placement.parent {
            Some((parent, side)) => self.link(parent, side, id),
            None => self.root = Some(id),
        }
        (id, placement)
    }

    /// Attach `value` under the node holding `parent_value` on `side`, or as
    /// the root when `parent` is `None`.
    ///
    /// Used when rebuilding a tree from `insert` events, which name the parent
    /// by value. Among equal values the node reached by descending toward
    /// `value` is preferred. Returns `None` if no matching free slot exists.
    pub fn attach(&mut self, value: i64, parent: Option<(i64, Side)>) -> Option<NodeId> {
        let Some((parent_value, side)) = parent else {
            if self.root.is_some() {
                return None;
            }
            let id = self.push_node(value);
            self.root = Some(id);
            return Some(id);
        };

        let by_descent = self.placement(value).parent.filter(|(p, s)| {
            *s == side && self.nodes[*p].value == parent_value
        });
        let slot = by_descent.map(|(p, _)| p).or_else(|| {
            self.preorder_ids()
                .into_iter()
                .find(|&p| self.nodes[p].value == parent_value && self.child(p, side).is_none())
        })?;

        let id = self.push_node(value);
        self.link(slot, side, id);
        Some(id)
    }

    fn push_node(&mut self, value: i64) -> NodeId {
        self.nodes.push(TreeNode {
            value,
            left: None,
            right: None,
        });
        self.nodes.len() - 1
    }

    fn link(&mut self, parent: NodeId, side: Side, child: NodeId) {
        let node = &mut self.nodes[parent];
        match side {
            Side::Left => node.left = Some(child),
            Side::Right => node.right = Some(child),
        }
    }

    fn preorder_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = &self.nodes[id];
            stack.extend(node.right);
            stack.extend(node.left);
        }
        out
    }

    /// Values in the requested traversal order.
    ///
    /// Iterative; list-shaped trees of any depth are handled.
    pub fn traverse(&self, order: Order) -> Vec<i64> {
        let ids = match order {
            Order::Pre => self.preorder_ids(),
            Order::In => self.inorder_ids(),
            Order::Post => self.postorder_ids(),
        };
        ids.into_iter().map(|id| self.nodes[id].value).collect()
    }

    fn inorder_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(id) = current {
                stack.push(id);
                current = self.nodes[id].left;
            }
            let Some(id) = stack.pop() else { break };
            out.push(id);
            current = self.nodes[id].right;
        }
        out
    }

    // Node-right-left preorder, reversed.
    fn postorder_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = &self.nodes[id];
            stack.extend(node.left);
            stack.extend(node.right);
        }
        out.reverse();
        out
    }

    /// Number of levels; an empty tree has height 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(values: &[i64]) -> BinaryTree {
        let mut tree = BinaryTree::new();
        for &v in values {
            tree.insert(v);
        }
        tree
    }

    #[test]
    fn test_placement_reports_parent_and_side() {
        let tree = build(&[5, 3]);
        let placement = tree.placement(4);
        let (parent, side) = placement.parent.expect("non-empty tree");
        assert_eq!(tree.value(parent), Some(3));
        assert_eq!(side, Side::Right);
        assert_eq!(BinaryTree::new().placement(1).parent, None);
    }

    #[test]
    fn test_traversals() {
        let tree = build(&[5, 3, 8, 1, 4]);
        assert_eq!(tree.traverse(Order::In), vec![1, 3, 4, 5, 8]);
        assert_eq!(tree.traverse(Order::Pre), vec![5, 3, 1, 4, 8]);
        assert_eq!(tree.traverse(Order::Post), vec![1, 4, 3, 8, 5]);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_list_shaped_tree_does_not_recurse() {
        let depth = 200_000;
        let mut tree = BinaryTree::new();
        let mut parent = tree.push_node(0);
        tree.root = Some(parent);
        for value in 1..depth {
            let id = tree.push_node(value);
            tree.link(parent, Side::Right, id);
            parent = id;
        }
        assert_eq!(tree.height(), depth as usize);
        let inorder = tree.traverse(Order::In);
        assert_eq!(inorder.len(), depth as usize);
        assert_eq!(inorder.first(), Some(&0));
        assert_eq!(tree.traverse(Order::Post).first(), Some(&(depth - 1)));
    }

    #[test]
    fn test_duplicates_go_right() {
        let tree = build(&[5, 5]);
        let root = tree.root().expect("root");
        assert!(tree.node(root).expect("node").right.is_some());
    }

    #[test]
    fn test_attach_rebuilds_same_shape() {
        let built = build(&[5, 3, 8, 3]);
        let mut rebuilt = BinaryTree::new();
        assert!(rebuilt.attach(5, None).is_some());
        assert!(rebuilt.attach(3, Some((5, Side::Left))).is_some());
        assert!(rebuilt.attach(8, Some((5, Side::Right))).is_some());
        assert!(rebuilt.attach(3, Some((3, Side::Right))).is_some());
        assert_eq!(rebuilt, built);
    }

    #[test]
    fn test_attach_rejects_missing_parent() {
        let mut tree = BinaryTree::new();
        assert!(tree.attach(5, None).is_some());
        assert!(tree.attach(6, None).is_none());
        assert!(tree.attach(7, Some((42, Side::Left))).is_none());
        assert_eq!(tree.len(), 1);
    }
}
