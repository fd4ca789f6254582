//! Lark language vocabulary registries.
//!
//! Callers work with **stable IDs** (`KeywordId`, `OperatorId`, `PunctuationId`) and look up
//! spellings/metadata through the registry tables instead of comparing strings.
//!
//! ## Notes
//! - Registries are pure: the scanner and parser enforce syntax, registries only describe it.
//!
//! ## Examples
//! ```rust
//! use lark_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::lookup("while"), Some(KeywordId::While));
//! assert_eq!(keywords::as_str(KeywordId::While), "while");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
