//! Lark compiler frontend
//!
//! Semantic passes over a parsed unit, run in this order by [`crate::pipeline`]:
//! - `scope`: builds the scope tree and checks identifier uses
//! - `wellformed`: checks every required child is present
//! - `static_check`: static checking scaffold
//!
//! Every pass is a [`lark_syntax::ast::Visitor`] and reports into the unit's `Diagnostics`.

// Syntax components are provided by the shared lark_syntax crate.
pub use lark_syntax::{ast, diagnostics, parser, scanner};

pub mod scope;
pub mod static_check;
pub mod wellformed;
