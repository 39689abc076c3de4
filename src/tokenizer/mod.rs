//! Lexical analysis module for the front end.
//!
//! This module contains the tokenizer that converts source text into a
//! complete token sequence for parsing. It handles:
//!
//! - Tokenization of source text using regex patterns
//! - Recognition of keywords, words, literals, and operators
//! - Row and column tracking for diagnostics
//! - Comments, whitespace, and line ends as explicit tokens
//!
//! Tokenization never fails: unrecognized characters become Unknown
//! tokens, and every sequence ends with a LineEnd and an EndOfSequence
//! sentinel.

pub mod sequence;
pub mod tokens;
pub mod tokenizer;

#[cfg(test)]
mod tests;
