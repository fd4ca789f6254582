//! Shared syntax frontend for the Lark language: scanner, parser, AST, diagnostics.
//!
//! This crate is intended for reuse across the compiler driver and future tooling.
//!
//! ## Notes
//! - This crate is "syntax-only": it does not resolve names or check structure beyond what the
//!   grammar enforces. Those passes live in the `lark` crate and run over [`ast::Block`] through the
//!   [`ast::Visitor`] protocol.
//! - Vocabulary identity (keywords/operators/punctuation) and diagnostic numbers come from
//!   `lark_core`.
//!
//! ## Examples
//! ```rust
//! use lark_syntax::diagnostics::Diagnostics;
//! use lark_syntax::parser;
//!
//! let mut diagnostics = Diagnostics::new("demo.lark");
//! let block = parser::parse_source("total = 1 + 2 * 3", &mut diagnostics).unwrap();
//! assert_eq!(block.statements.len(), 1);
//! assert!(diagnostics.is_empty());
//! ```

pub mod ast;
pub mod diagnostics;
pub mod dump;
pub mod location;
pub mod parser;
pub mod scanner;
pub mod token_helpers;
