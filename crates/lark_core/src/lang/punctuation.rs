//! Punctuation vocabulary.
//!
//! Delimiters, separators and the member-access dot. Each punctuation token is a single code point
//! and uses that code point as its discriminant.
//!
//! ## Examples
//! ```rust
//! use lark_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_char('('), Some(PunctuationId::LParen));
//! assert_eq!(PunctuationId::Colon.code(), ':' as u32);
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,` and `:`.
    Separator,
    /// Member access `.`.
    Access,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PunctuationId {
    LParen = '(' as u32,
    RParen = ')' as u32,
    LBracket = '[' as u32,
    RBracket = ']' as u32,
    LBrace = '{' as u32,
    RBrace = '}' as u32,
    Comma = ',' as u32,
    Colon = ':' as u32,
    Dot = '.' as u32,
}

impl PunctuationId {
    /// The code point this punctuation is spelled with.
    pub const fn code(self) -> u32 {
        self as u32
    }
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: char,
    pub category: PunctuationCategory,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::LParen, '(', PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ')', PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, '[', PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, ']', PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, '{', PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, '}', PunctuationCategory::Delimiter),
    info(PunctuationId::Comma, ',', PunctuationCategory::Separator),
    info(PunctuationId::Colon, ':', PunctuationCategory::Separator),
    info(PunctuationId::Dot, '.', PunctuationCategory::Access),
];

/// Return the spelling for a punctuation token.
pub fn as_char(id: PunctuationId) -> char {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a code point to its punctuation identifier.
pub fn from_char(c: char) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == c).map(|p| p.id)
}

const fn info(id: PunctuationId, canonical: char, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo { id, canonical, category }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminant_matches_spelling() {
        for p in PUNCTUATION {
            assert_eq!(p.id.code(), p.canonical as u32);
            assert_eq!(from_char(p.canonical), Some(p.id));
        }
    }
}
