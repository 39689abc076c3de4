use std::fmt::Display;
use std::ops::Index;

use super::node::Node;

/// Opaque handle to a node in a `NodeArena`. Handles are plain indexes,
/// so they are only meaningful against the arena that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns every node of a parse. Nodes are immutable once allocated;
/// `truncate` discards the newest ones when a speculative parse is
/// rolled back.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena { nodes: vec![] }
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Discards every node allocated at or past `len`. Only safe while
    /// nothing committed refers to the discarded tail, which rollback
    /// guarantees.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Structural equality: walks both subtrees comparing variants,
    /// scalar payloads, and child shapes. Handle identity plays no part,
    /// so trees from different arenas (or different parses of the same
    /// source) compare equal when they have the same shape.
    pub fn structural_eq(&self, a: NodeId, other: &NodeArena, b: NodeId) -> bool {
        let left = self.get(a);
        let right = other.get(b);

        if !left.same_head(right) {
            return false;
        }

        let left_children = left.child_ids();
        let right_children = right.child_ids();

        left_children.len() == right_children.len()
            && left_children
                .iter()
                .zip(right_children.iter())
                .all(|(x, y)| self.structural_eq(*x, other, *y))
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
    }
}
