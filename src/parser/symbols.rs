//! Node-to-source symbol records.
//!
//! Every node that survives a commit gets one entry tying it back to the
//! tokens it owns and to its child nodes. Walking entries child-ward
//! recovers the full source extent of a subtree; the node itself only
//! records the tokens that name it (a keyword, an operator, an opener).

use std::collections::HashMap;

use crate::ast::arena::NodeId;
use crate::tokenizer::tokens::Token;

/// Source record for one node: the tokens the node itself owns plus its
/// children in structural order.
#[derive(Debug, Clone, Default)]
pub struct SymbolEntry {
    pub tokens: Vec<Token>,
    pub children: Vec<NodeId>,
}

/// Map from committed nodes to their source records.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<NodeId, SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Records the entry for a node. Nodes are allocated once and
    /// committed once, so a second insert for the same node is a bug.
    pub fn insert(&mut self, id: NodeId, entry: SymbolEntry) {
        let previous = self.entries.insert(id, entry);
        debug_assert!(previous.is_none(), "duplicate symbol entry for {}", id);
    }

    pub fn get(&self, id: NodeId) -> Option<&SymbolEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &SymbolEntry)> {
        self.entries.iter()
    }
}
