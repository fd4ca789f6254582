#![forbid(unsafe_code)]
//! Lark Compiler Front End
//!
//! Lark is a small imperative, object-oriented scripting language. This crate turns Lark source
//! files into checked syntax trees: decoding, scanning and parsing (via `lark_syntax`), then scope
//! resolution, well-formedness and static checking.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: Registry lookups that can only fail on a compiler bug use `.expect("...")`
//!   with a clear explanation.
//!
//! ## Examples
//! ```rust
//! use lark::pipeline;
//!
//! let report = pipeline::compile_source("demo.lark", "x = 2\ny = x * 3");
//! assert!(report.succeeded());
//! ```

pub mod cli;
pub mod errors;
pub mod frontend;
pub mod pipeline;
pub mod source;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::parser;
pub use frontend::scanner;
pub use frontend::scope;
pub use frontend::static_check;
pub use frontend::wellformed;

pub use errors::FatalError;
pub use pipeline::{Stage, UnitReport, compile_chars, compile_file, compile_source};
