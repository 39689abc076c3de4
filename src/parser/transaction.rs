//! Speculation support for the parser.
//!
//! Every parse attempt runs inside a transaction. While a transaction is
//! open, diagnostics and symbol records accumulate in its frame instead of
//! the permanent stores, so an abandoned attempt leaves no trace:
//!
//! - `begin` snapshots the cursor and the arena length
//! - `commit` folds the frame's buffers into the enclosing frame (or the
//!   permanent stores at the top level), preserving staging order
//! - `rollback` discards the buffers and hands back the snapshot so the
//!   caller can restore the cursor and truncate the arena
//!
//! Frames nest as a stack. Only the innermost open frame may be committed
//! or rolled back; doing otherwise is a parser bug and panics.

use crate::ast::arena::NodeId;
use crate::errors::errors::Diagnostic;

use super::symbols::{SymbolEntry, SymbolTable};

/// Handle to one open frame. `begin` hands it out and exactly one of
/// `commit` or `rollback` must consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    depth: usize,
}

/// Snapshot returned by `rollback`. The caller restores the token cursor
/// to `position` and truncates the arena to `nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub position: i32,
    pub nodes: usize,
}

#[derive(Debug)]
struct Frame {
    saved_position: i32,
    saved_nodes: usize,
    diagnostics: Vec<Diagnostic>,
    symbols: Vec<(NodeId, SymbolEntry)>,
}

/// Owner of the frame stack and of the permanent diagnostic and symbol
/// stores that committed frames drain into.
#[derive(Debug, Default)]
pub struct TransactionSource {
    frames: Vec<Frame>,
    diagnostics: Vec<Diagnostic>,
    symbols: SymbolTable,
}

impl TransactionSource {
    pub fn new() -> Self {
        TransactionSource::default()
    }

    /// Opens a frame over the given cursor position and arena length.
    pub fn begin(&mut self, position: i32, nodes: usize) -> Transaction {
        self.frames.push(Frame {
            saved_position: position,
            saved_nodes: nodes,
            diagnostics: Vec::new(),
            symbols: Vec::new(),
        });
        Transaction { depth: self.frames.len() }
    }

    /// Folds the innermost frame into its parent, or into the permanent
    /// stores when no parent remains. Staging order is preserved, so
    /// diagnostics surface in the order they were produced.
    pub fn commit(&mut self, transaction: Transaction) {
        assert_eq!(
            transaction.depth,
            self.frames.len(),
            "commit of a non-innermost transaction"
        );
        let frame = self.frames.pop().unwrap();
        match self.frames.last_mut() {
            Some(parent) => {
                parent.diagnostics.extend(frame.diagnostics);
                parent.symbols.extend(frame.symbols);
            }
            None => {
                self.diagnostics.extend(frame.diagnostics);
                for (id, entry) in frame.symbols {
                    self.symbols.insert(id, entry);
                }
            }
        }
    }

    /// Discards the innermost frame's buffers and returns the snapshot
    /// taken at `begin`.
    pub fn rollback(&mut self, transaction: Transaction) -> Snapshot {
        assert_eq!(
            transaction.depth,
            self.frames.len(),
            "rollback of a non-innermost transaction"
        );
        let frame = self.frames.pop().unwrap();
        Snapshot { position: frame.saved_position, nodes: frame.saved_nodes }
    }

    /// Stages a diagnostic in the innermost open frame. With no frame open
    /// it lands in the permanent store directly; only the parse driver
    /// writes in that state.
    pub fn stage_diagnostic(&mut self, diagnostic: Diagnostic) {
        match self.frames.last_mut() {
            Some(frame) => frame.diagnostics.push(diagnostic),
            None => self.diagnostics.push(diagnostic),
        }
    }

    /// Stages a node's symbol record alongside the diagnostics of the
    /// innermost frame.
    pub fn stage_symbol(&mut self, id: NodeId, entry: SymbolEntry) {
        match self.frames.last_mut() {
            Some(frame) => frame.symbols.push((id, entry)),
            None => self.symbols.insert(id, entry),
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Committed diagnostics, in staging order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Committed symbol records.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Tears the source down into its permanent stores.
    pub fn into_parts(self) -> (Vec<Diagnostic>, SymbolTable) {
        assert!(self.frames.is_empty(), "open transaction at teardown");
        (self.diagnostics, self.symbols)
    }
}
