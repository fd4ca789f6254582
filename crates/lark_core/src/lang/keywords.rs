//! Define the reserved keyword vocabulary for the Lark language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) recording canonical spellings and
//! categories.
//!
//! ## Notes
//! - Every keyword is between [`MIN_KEYWORD_LEN`] and [`MAX_KEYWORD_LEN`] characters long. The
//!   scanner never compares a run outside that window against the table.
//! - [`lookup`] only compares a spelling against the keywords of the same length (see
//!   [`bucket`]), so scanning an identifier never walks the whole table.
//! - `true`, `false` and `nil` are reserved here but scan to literal tokens.
//!
//! ## Examples
//! ```rust
//! use lark_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::lookup("foreach"), Some(KeywordId::Foreach));
//! assert_eq!(keywords::lookup("protected"), None); // nine characters: never a keyword
//! assert_eq!(keywords::bucket(2).len(), 3);
//! ```

/// Shortest keyword spelling.
pub const MIN_KEYWORD_LEN: usize = 2;

/// Longest keyword spelling.
pub const MAX_KEYWORD_LEN: usize = 7;

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Selection
    If,
    Elseif,
    Else,
    Case,
    When,
    Then,
    End,

    // Iteration
    While,
    For,
    Foreach,
    In,
    Do,

    // Jumps
    Break,
    Next,
    Return,

    // Definitions
    Routine,
    Out,
    Class,
    Include,
    Package,
    Import,
    Public,
    Private,

    // Receivers / literals
    This,
    True,
    False,
    Nil,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Selection,
    Iteration,
    Jump,
    Definition,
    Access,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Selection
    info(KeywordId::If, "if", KeywordCategory::Selection),
    info(KeywordId::Elseif, "elseif", KeywordCategory::Selection),
    info(KeywordId::Else, "else", KeywordCategory::Selection),
    info(KeywordId::Case, "case", KeywordCategory::Selection),
    info(KeywordId::When, "when", KeywordCategory::Selection),
    info(KeywordId::Then, "then", KeywordCategory::Selection),
    info(KeywordId::End, "end", KeywordCategory::Selection),
    // Iteration
    info(KeywordId::While, "while", KeywordCategory::Iteration),
    info(KeywordId::For, "for", KeywordCategory::Iteration),
    info(KeywordId::Foreach, "foreach", KeywordCategory::Iteration),
    info(KeywordId::In, "in", KeywordCategory::Iteration),
    info(KeywordId::Do, "do", KeywordCategory::Iteration),
    // Jumps
    info(KeywordId::Break, "break", KeywordCategory::Jump),
    info(KeywordId::Next, "next", KeywordCategory::Jump),
    info(KeywordId::Return, "return", KeywordCategory::Jump),
    // Definitions
    info(KeywordId::Routine, "routine", KeywordCategory::Definition),
    info(KeywordId::Out, "out", KeywordCategory::Definition),
    info(KeywordId::Class, "class", KeywordCategory::Definition),
    info(KeywordId::Include, "include", KeywordCategory::Definition),
    info(KeywordId::Package, "package", KeywordCategory::Definition),
    info(KeywordId::Import, "import", KeywordCategory::Definition),
    info(KeywordId::Public, "public", KeywordCategory::Access),
    info(KeywordId::Private, "private", KeywordCategory::Access),
    // Receivers / literals
    info(KeywordId::This, "this", KeywordCategory::Literal),
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Nil, "nil", KeywordCategory::Literal),
];

/// Keywords grouped by spelling length; index `n` holds every keyword of length `n`.
const BUCKETS: [&[KeywordId]; MAX_KEYWORD_LEN + 1] = [
    &[],
    &[],
    &[KeywordId::If, KeywordId::In, KeywordId::Do],
    &[KeywordId::End, KeywordId::For, KeywordId::Out, KeywordId::Nil],
    &[
        KeywordId::Else,
        KeywordId::Case,
        KeywordId::When,
        KeywordId::Then,
        KeywordId::Next,
        KeywordId::This,
        KeywordId::True,
    ],
    &[KeywordId::While, KeywordId::Break, KeywordId::Class, KeywordId::False],
    &[KeywordId::Elseif, KeywordId::Return, KeywordId::Import, KeywordId::Public],
    &[
        KeywordId::Foreach,
        KeywordId::Routine,
        KeywordId::Include,
        KeywordId::Package,
        KeywordId::Private,
    ],
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Keywords whose spelling is exactly `len` characters long.
///
/// ## Returns
/// - An empty slice when `len` is outside `MIN_KEYWORD_LEN..=MAX_KEYWORD_LEN`.
pub fn bucket(len: usize) -> &'static [KeywordId] {
    BUCKETS.get(len).copied().unwrap_or(&[])
}

/// Resolve a spelling to a keyword, comparing only against keywords of the same length.
///
/// ## Notes
/// - Matching is **case-sensitive**.
/// - Spellings shorter than [`MIN_KEYWORD_LEN`] or longer than [`MAX_KEYWORD_LEN`] are rejected
///   without any comparison.
pub fn lookup(spelling: &str) -> Option<KeywordId> {
    let len = spelling.chars().count();
    if !(MIN_KEYWORD_LEN..=MAX_KEYWORD_LEN).contains(&len) {
        return None;
    }
    bucket(len).iter().copied().find(|id| as_str(*id) == spelling)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, canonical, category }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_fits_the_length_window() {
        for k in KEYWORDS {
            let len = k.canonical.len();
            assert!(
                (MIN_KEYWORD_LEN..=MAX_KEYWORD_LEN).contains(&len),
                "{:?} has length {}",
                k.id,
                len
            );
        }
    }

    #[test]
    fn buckets_cover_registry_exactly_once() {
        let bucketed: usize = (0..=MAX_KEYWORD_LEN).map(|n| bucket(n).len()).sum();
        assert_eq!(bucketed, KEYWORDS.len());

        for k in KEYWORDS {
            let hits = bucket(k.canonical.len()).iter().filter(|id| **id == k.id).count();
            assert_eq!(hits, 1, "{:?} must appear once in bucket {}", k.id, k.canonical.len());
        }
    }

    #[test]
    fn lookup_round_trips_every_keyword() {
        for k in KEYWORDS {
            assert_eq!(lookup(k.canonical), Some(k.id));
        }
    }

    #[test]
    fn lookup_rejects_lengths_outside_window() {
        assert_eq!(lookup("x"), None);
        assert_eq!(lookup("protected"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(lookup("If"), None);
        assert_eq!(lookup("END"), None);
    }
}
