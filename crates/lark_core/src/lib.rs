//! Provide the canonical language vocabulary and diagnostic catalog for the Lark front end.
//!
//! This crate is intentionally small and dependency-free. It holds the pure tables that both the
//! syntax crate (scanner/parser) and the compiler driver (semantic passes, CLI) agree on:
//! - reserved keywords, bucketed by spelling length for the scanner,
//! - operators and punctuation, tagged with their source code points,
//! - numbered diagnostic codes with their fixed messages.
//!
//! ## Notes
//!
//! - No IO, no global state, no AST types.

pub mod diagnostics;
pub mod lang;
