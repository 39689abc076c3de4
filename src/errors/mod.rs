//! Diagnostic types and reporting for the front end.
//!
//! This module defines the diagnostics recorded while parsing. It
//! includes:
//!
//! - Diagnostic structures with source range information
//! - Specific diagnostic kinds with stable info codes
//! - Severity classification
//! - Diagnostic formatting and fix suggestions

pub mod errors;

#[cfg(test)]
mod tests;
