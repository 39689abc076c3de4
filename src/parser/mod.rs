//! Parser module for building a syntax tree out of a token sequence.
//!
//! This module contains the parser that transforms a stream of tokens
//! into an arena-backed syntax tree. It uses a Pratt parser for
//! expressions with proper operator precedence and handles:
//!
//! - Statement parsing (definitions, control flow, imports)
//! - Expression parsing (binary ops, calls, literals, casts)
//! - Type parsing for annotations and generic arguments
//! - Speculative parsing with transactional rollback
//! - Diagnostic recovery that never gives up on the token stream
//!
//! The parser uses NUD (null denotation) and LED (left denotation)
//! functions for expression parsing with binding power for precedence
//! handling. Every consumed token is attributed to a node through the
//! symbol table built alongside the tree.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod symbols;
pub mod transaction;
pub mod types;
