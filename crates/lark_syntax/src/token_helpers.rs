//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy
//! to work with ID-based tokens.

use lark_core::lang::keywords::KeywordId;
use lark_core::lang::operators::{self, OperatorId};
use lark_core::lang::punctuation::PunctuationId;

use crate::scanner::{Token, TokenKind};

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` if this token closes a block.
    ///
    /// Blocks run until `end`, an `else`/`elseif`/`when` branch, a `public`/`private` class section,
    /// or the end of the unit.
    pub fn is_block_terminator(&self) -> bool {
        match self {
            TokenKind::Eof => true,
            TokenKind::Keyword(id) => matches!(
                id,
                KeywordId::End
                    | KeywordId::Else
                    | KeywordId::Elseif
                    | KeywordId::When
                    | KeywordId::Public
                    | KeywordId::Private
            ),
            _ => false,
        }
    }

    /// Return `true` if this token can begin an expression.
    pub fn starts_expression(&self) -> bool {
        match self {
            TokenKind::Ident(_)
            | TokenKind::Int(_)
            | TokenKind::Real(_)
            | TokenKind::String(_)
            | TokenKind::Bool(_)
            | TokenKind::Nil => true,
            TokenKind::Keyword(id) => matches!(
                id,
                KeywordId::This | KeywordId::Routine | KeywordId::Class | KeywordId::Package
            ),
            TokenKind::Punctuation(id) => matches!(
                id,
                PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace
            ),
            TokenKind::Operator(id) => operators::is_prefix(*id),
            TokenKind::Eof => false,
        }
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.keyword_id()`.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    /// Convenience wrapper for `self.kind.operator_id()`.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_terminators() {
        assert!(TokenKind::Eof.is_block_terminator());
        assert!(TokenKind::Keyword(KeywordId::Elseif).is_block_terminator());
        assert!(!TokenKind::Keyword(KeywordId::Then).is_block_terminator());
        assert!(!TokenKind::Ident("end".to_string()).is_block_terminator());
    }

    #[test]
    fn expression_starts() {
        assert!(TokenKind::Operator(OperatorId::Minus).starts_expression());
        assert!(!TokenKind::Operator(OperatorId::Plus).starts_expression());
        assert!(TokenKind::Keyword(KeywordId::Routine).starts_expression());
        assert!(!TokenKind::Keyword(KeywordId::End).starts_expression());
    }
}
