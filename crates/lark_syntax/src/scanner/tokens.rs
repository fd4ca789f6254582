//! Token types for the Lark scanner.
//!
//! Vocabulary tokens carry registry-backed IDs from `lark_core::lang`:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for delimiters and separators
//!
//! ## Notes
//! - `true`, `false` and `nil` are reserved but scan to [`TokenKind::Bool`] / [`TokenKind::Nil`].
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use std::fmt;

use lark_core::lang::keywords::{self, KeywordId};
use lark_core::lang::operators::{self, OperatorId};
use lark_core::lang::punctuation::{self, PunctuationId};

use crate::location::Location;

/// Kind of token produced by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    Int(i64),
    Real(f64),
    String(String),
    Bool(bool),
    Nil,

    // ========== Special ==========
    Eof,
}

/// A token with its kind and the location of its first code point.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, location: Location) -> Self {
        Self { kind, location }
    }
}

/// Token for a reserved word, mapping literal keywords to their literal kinds.
pub(crate) fn keyword_token(id: KeywordId) -> TokenKind {
    match id {
        KeywordId::True => TokenKind::Bool(true),
        KeywordId::False => TokenKind::Bool(false),
        KeywordId::Nil => TokenKind::Nil,
        other => TokenKind::Keyword(other),
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(id) => write!(f, "keyword `{}`", keywords::as_str(*id)),
            TokenKind::Operator(id) => write!(f, "operator `{}`", operators::as_str(*id)),
            TokenKind::Punctuation(id) => write!(f, "`{}`", punctuation::as_char(*id)),
            TokenKind::Ident(name) => write!(f, "identifier `{}`", name),
            TokenKind::Int(value) => write!(f, "integer {}", value),
            TokenKind::Real(value) => write!(f, "real {:?}", value),
            TokenKind::String(value) => write!(f, "string {}", super::strings::quote(value)),
            TokenKind::Bool(value) => write!(f, "bool {}", value),
            TokenKind::Nil => write!(f, "nil"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.location, self.kind)
    }
}
