//! Operator vocabulary.
//!
//! This module defines the canonical operator set together with the binary precedence ladder the
//! parser climbs.
//!
//! ## Notes
//! - Single-character operators use their own code point as the enum discriminant, so
//!   `OperatorId::Plus as u32 == '+' as u32`. Two-character operators get dedicated tags above the
//!   Unicode range so they can never collide with a code point.
//! - Lookup via [`from_str`] is **case-sensitive**.
//!
//! ## Examples
//! ```rust
//! use lark_core::lang::operators::{self, BinaryLevel, OperatorId};
//!
//! assert_eq!(operators::from_str("<<"), Some(OperatorId::ShiftLeft));
//! assert_eq!(OperatorId::Plus.code(), '+' as u32);
//! assert_eq!(operators::binary_level(OperatorId::Star), Some(BinaryLevel::Multiplicative));
//! ```

/// First tag value reserved for multi-character operators (one past the last Unicode scalar).
const MULTI_CHAR_BASE: u32 = 0x11_0000;

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum OperatorId {
    // Single character: tagged with their code point
    Plus = '+' as u32,
    Minus = '-' as u32,
    Star = '*' as u32,
    Slash = '/' as u32,
    Percent = '%' as u32,
    Ampersand = '&' as u32,
    Pipe = '|' as u32,
    Caret = '^' as u32,
    Tilde = '~' as u32,
    Bang = '!' as u32,
    Assign = '=' as u32,
    Less = '<' as u32,
    Greater = '>' as u32,

    // Two characters: dedicated tags
    ShiftLeft = MULTI_CHAR_BASE,
    ShiftRight = MULTI_CHAR_BASE + 1,
    LessEqual = MULTI_CHAR_BASE + 2,
    GreaterEqual = MULTI_CHAR_BASE + 3,
    EqualEqual = MULTI_CHAR_BASE + 4,
    NotEqual = MULTI_CHAR_BASE + 5,
    AndAnd = MULTI_CHAR_BASE + 6,
    OrOr = MULTI_CHAR_BASE + 7,
}

impl OperatorId {
    /// Numeric tag of this operator (its code point for single-character operators).
    pub const fn code(self) -> u32 {
        self as u32
    }
}

/// One rung of the binary precedence ladder, ordered from loosest to tightest binding.
///
/// ## Notes
/// - `Ord` follows binding strength: `LogicalOr < LogicalAnd < … < Multiplicative`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BinaryLevel {
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    BitwiseOr,
    BitwiseAnd,
    Shift,
    Additive,
    Multiplicative,
}

impl BinaryLevel {
    /// The loosest binary level (the one assignment parses its operand with).
    pub const LOOSEST: BinaryLevel = BinaryLevel::LogicalOr;

    /// The next tighter level, or `None` for [`BinaryLevel::Multiplicative`] (whose operands are unary).
    pub const fn tighter(self) -> Option<BinaryLevel> {
        match self {
            BinaryLevel::LogicalOr => Some(BinaryLevel::LogicalAnd),
            BinaryLevel::LogicalAnd => Some(BinaryLevel::Equality),
            BinaryLevel::Equality => Some(BinaryLevel::Relational),
            BinaryLevel::Relational => Some(BinaryLevel::BitwiseOr),
            BinaryLevel::BitwiseOr => Some(BinaryLevel::BitwiseAnd),
            BinaryLevel::BitwiseAnd => Some(BinaryLevel::Shift),
            BinaryLevel::Shift => Some(BinaryLevel::Additive),
            BinaryLevel::Additive => Some(BinaryLevel::Multiplicative),
            BinaryLevel::Multiplicative => None,
        }
    }

    /// Lower-case name used in AST dumps and diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            BinaryLevel::LogicalOr => "logical-or",
            BinaryLevel::LogicalAnd => "logical-and",
            BinaryLevel::Equality => "equality",
            BinaryLevel::Relational => "relational",
            BinaryLevel::BitwiseOr => "bitwise-or",
            BinaryLevel::BitwiseAnd => "bitwise-and",
            BinaryLevel::Shift => "shift",
            BinaryLevel::Additive => "additive",
            BinaryLevel::Multiplicative => "multiplicative",
        }
    }
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    /// Binary rung this operator belongs to, if it is an infix operator.
    pub binary: Option<BinaryLevel>,
    /// Whether the operator may appear in prefix position.
    pub prefix: bool,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, "+", Some(BinaryLevel::Additive), false),
    op(OperatorId::Minus, "-", Some(BinaryLevel::Additive), true),
    op(OperatorId::Star, "*", Some(BinaryLevel::Multiplicative), false),
    op(OperatorId::Slash, "/", Some(BinaryLevel::Multiplicative), false),
    op(OperatorId::Percent, "%", Some(BinaryLevel::Multiplicative), false),
    // Bitwise
    op(OperatorId::Ampersand, "&", Some(BinaryLevel::BitwiseAnd), false),
    op(OperatorId::Pipe, "|", Some(BinaryLevel::BitwiseOr), false),
    op(OperatorId::Caret, "^", Some(BinaryLevel::BitwiseOr), false),
    op(OperatorId::Tilde, "~", None, true),
    op(OperatorId::ShiftLeft, "<<", Some(BinaryLevel::Shift), false),
    op(OperatorId::ShiftRight, ">>", Some(BinaryLevel::Shift), false),
    // Comparison
    op(OperatorId::Less, "<", Some(BinaryLevel::Relational), false),
    op(OperatorId::Greater, ">", Some(BinaryLevel::Relational), false),
    op(OperatorId::LessEqual, "<=", Some(BinaryLevel::Relational), false),
    op(OperatorId::GreaterEqual, ">=", Some(BinaryLevel::Relational), false),
    op(OperatorId::EqualEqual, "==", Some(BinaryLevel::Equality), false),
    op(OperatorId::NotEqual, "!=", Some(BinaryLevel::Equality), false),
    // Logical
    op(OperatorId::Bang, "!", None, true),
    op(OperatorId::AndAnd, "&&", Some(BinaryLevel::LogicalAnd), false),
    op(OperatorId::OrOr, "||", Some(BinaryLevel::LogicalOr), false),
    // Assignment (handled by its own right-associative production)
    op(OperatorId::Assign, "=", None, false),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Canonical spelling of an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Binary rung of an operator, if it is infix.
pub fn binary_level(id: OperatorId) -> Option<BinaryLevel> {
    info_for(id).binary
}

/// Whether an operator may be used in prefix position.
pub fn is_prefix(id: OperatorId) -> bool {
    info_for(id).prefix
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Resolve a single code point to a single-character operator.
pub fn from_char(c: char) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| o.id.code() < MULTI_CHAR_BASE && o.id.code() == c as u32)
        .map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, spelling: &'static str, binary: Option<BinaryLevel>, prefix: bool) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        binary,
        prefix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_char_tags_are_code_points() {
        for o in OPERATORS {
            let mut chars = o.spelling.chars();
            let first = chars.next().expect("empty spelling");
            if chars.next().is_none() {
                assert_eq!(o.id.code(), first as u32, "{:?}", o.id);
                assert_eq!(from_char(first), Some(o.id));
            } else {
                assert!(o.id.code() >= MULTI_CHAR_BASE, "{:?}", o.id);
            }
        }
    }

    #[test]
    fn ladder_walks_from_loosest_to_tightest() {
        let mut level = BinaryLevel::LOOSEST;
        let mut seen = vec![level];
        while let Some(next) = level.tighter() {
            assert!(next > level);
            seen.push(next);
            level = next;
        }
        assert_eq!(seen.len(), 9);
        assert_eq!(level, BinaryLevel::Multiplicative);
    }

    #[test]
    fn spellings_round_trip() {
        for o in OPERATORS {
            assert_eq!(from_str(o.spelling), Some(o.id));
        }
    }

    #[test]
    fn assignment_is_not_on_the_binary_ladder() {
        assert_eq!(binary_level(OperatorId::Assign), None);
        assert!(is_prefix(OperatorId::Minus));
        assert!(!is_prefix(OperatorId::Plus));
    }
}
