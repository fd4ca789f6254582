//! Parser for the Lark programming language
//!
//! Recursive descent over tokens pulled on demand from the [`Scanner`], producing a [`Block`] for
//! the whole unit.
//!
//! ## Notes
//! - Parsing is fail-fast: the first syntax error is recorded in the unit's [`Diagnostics`] and
//!   every production returns [`Reported`] from there up to the caller. There is no recovery.
//! - Lexical errors do not stop the parse, but a unit with lexical errors never yields a tree.
//!
//! ## Examples
//!
//! ```rust
//! use lark_syntax::diagnostics::Diagnostics;
//! use lark_syntax::{dump, parser};
//!
//! let mut diagnostics = Diagnostics::new("example.lark");
//! let unit = parser::parse_source("a = b = 1", &mut diagnostics).unwrap();
//! assert_eq!(dump::dump(&unit), "(assign a (assign b 1))");
//! ```

use crate::ast::*;
use crate::diagnostics::{Diagnostics, Reported};
use crate::scanner::{Scanner, Token, TokenKind};
use lark_core::diagnostics::DiagnosticCode;
use lark_core::lang::keywords::KeywordId;
use lark_core::lang::operators::{self, BinaryLevel, OperatorId};
use lark_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/literals.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
