//! Numbered diagnostic catalog.
//!
//! Every problem the front end can report has a stable number and a fixed human-readable message.
//! Numbers are partitioned by category:
//!
//! | range | category |
//! |-------|----------|
//! | 1000s | warnings |
//! | 2000s | lexical errors |
//! | 3000s | syntax errors |
//! | 3500s | semantic errors |
//!
//! Fatal conditions use a separate namespace ([`FatalCode`], also numbered in the 1000s) because
//! they abort a whole compilation unit instead of a single construct.
//!
//! ## Examples
//! ```rust
//! use lark_core::diagnostics::{self, DiagnosticCode, Severity};
//!
//! assert_eq!(DiagnosticCode::WrongCharacter.number(), 2001);
//! assert_eq!(DiagnosticCode::WrongCharacter.severity(), Severity::Error);
//! assert_eq!(diagnostics::message_for_number(9999), None);
//! ```

use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl Severity {
    /// Single-letter prefix used when rendering a code (`W1001`, `E2001`, `F1002`).
    pub const fn prefix(self) -> char {
        match self {
            Severity::Warning => 'W',
            Severity::Error => 'E',
            Severity::Fatal => 'F',
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// Stable identifier for every recoverable diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum DiagnosticCode {
    // Warnings
    UnknownEscapeSequence = 1001,

    // Lexical errors
    WrongCharacter = 2001,
    StringNotTerminated = 2002,
    IntegerLiteralTooLarge = 2003,

    // Syntax errors
    ExpectedExpression = 3001,
    ExpectedLhs = 3002,
    ExpectedIdentifier = 3003,
    ExpectedEnd = 3004,
    ExpectedLeftParen = 3005,
    ExpectedRightParen = 3006,
    ExpectedRightBracket = 3007,
    ExpectedRightBrace = 3008,
    ExpectedColon = 3009,
    ExpectedComma = 3010,
    ExpectedIn = 3011,
    ExpectedDo = 3012,
    ExpectedThen = 3013,
    ExpectedWhen = 3014,
    OutputParameterDefaultArgument = 3015,
    ExpectedEndOfFile = 3016,
    NestingTooDeep = 3017,

    // Semantic errors
    UseOfUndeclaredIdentifier = 3501,
    MissingChild = 3502,
}

/// Metadata for a diagnostic code.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticInfo {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: &'static str,
}

/// Registry of all recoverable diagnostics.
pub const DIAGNOSTICS: &[DiagnosticInfo] = &[
    // Warnings
    diag(
        DiagnosticCode::UnknownEscapeSequence,
        Severity::Warning,
        "unknown escape sequence in string literal",
    ),
    // Lexical errors
    diag(DiagnosticCode::WrongCharacter, Severity::Error, "unexpected character"),
    diag(
        DiagnosticCode::StringNotTerminated,
        Severity::Error,
        "string literal is not terminated",
    ),
    diag(
        DiagnosticCode::IntegerLiteralTooLarge,
        Severity::Error,
        "integer literal does not fit in 64 bits",
    ),
    // Syntax errors
    diag(DiagnosticCode::ExpectedExpression, Severity::Error, "expected an expression"),
    diag(
        DiagnosticCode::ExpectedLhs,
        Severity::Error,
        "left-hand side of an assignment must be an identifier, member or index reference",
    ),
    diag(DiagnosticCode::ExpectedIdentifier, Severity::Error, "expected an identifier"),
    diag(DiagnosticCode::ExpectedEnd, Severity::Error, "expected 'end'"),
    diag(DiagnosticCode::ExpectedLeftParen, Severity::Error, "expected '('"),
    diag(DiagnosticCode::ExpectedRightParen, Severity::Error, "expected ')'"),
    diag(DiagnosticCode::ExpectedRightBracket, Severity::Error, "expected ']'"),
    diag(DiagnosticCode::ExpectedRightBrace, Severity::Error, "expected '}'"),
    diag(DiagnosticCode::ExpectedColon, Severity::Error, "expected ':'"),
    diag(DiagnosticCode::ExpectedComma, Severity::Error, "expected ','"),
    diag(DiagnosticCode::ExpectedIn, Severity::Error, "expected 'in'"),
    diag(DiagnosticCode::ExpectedDo, Severity::Error, "expected 'do'"),
    diag(DiagnosticCode::ExpectedThen, Severity::Error, "expected 'then'"),
    diag(DiagnosticCode::ExpectedWhen, Severity::Error, "expected 'when'"),
    diag(
        DiagnosticCode::OutputParameterDefaultArgument,
        Severity::Error,
        "output parameters cannot have a default argument",
    ),
    diag(DiagnosticCode::ExpectedEndOfFile, Severity::Error, "expected end of file"),
    diag(DiagnosticCode::NestingTooDeep, Severity::Error, "construct is nested too deeply"),
    // Semantic errors
    diag(
        DiagnosticCode::UseOfUndeclaredIdentifier,
        Severity::Error,
        "use of undeclared identifier",
    ),
    diag(
        DiagnosticCode::MissingChild,
        Severity::Error,
        "syntax tree is missing a required child",
    ),
];

impl DiagnosticCode {
    /// The stable number of this code.
    pub const fn number(self) -> u16 {
        self as u16
    }

    /// The severity every occurrence of this code is reported with.
    pub fn severity(self) -> Severity {
        info_for(self).severity
    }

    /// The fixed message for this code.
    pub fn message(self) -> &'static str {
        info_for(self).message
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.severity().prefix(), self.number())
    }
}

/// Return the full metadata entry for a diagnostic code.
///
/// ## Panics
/// - If the registry is missing an entry for `code` (this indicates a programming error).
pub fn info_for(code: DiagnosticCode) -> &'static DiagnosticInfo {
    DIAGNOSTICS
        .iter()
        .find(|d| d.code == code)
        .expect("diagnostic info missing")
}

/// Resolve a number back to its code.
pub fn from_number(number: u16) -> Option<DiagnosticCode> {
    DIAGNOSTICS.iter().find(|d| d.code.number() == number).map(|d| d.code)
}

/// Fixed message for a number, if the number is known.
pub fn message_for_number(number: u16) -> Option<&'static str> {
    from_number(number).map(DiagnosticCode::message)
}

/// Render a bare number the way a sink prints it: the message when known, else just the number.
pub fn describe_number(number: u16) -> String {
    match from_number(number) {
        Some(code) => format!("{}: {}", code, code.message()),
        None => number.to_string(),
    }
}

const fn diag(code: DiagnosticCode, severity: Severity, message: &'static str) -> DiagnosticInfo {
    DiagnosticInfo {
        code,
        severity,
        message,
    }
}

// ============================================================================
// Fatal codes
// ============================================================================

/// Conditions that abort a whole compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum FatalCode {
    NoInputFile = 1001,
    CannotOpen = 1002,
    CannotRead = 1003,
    CannotClose = 1004,
    OutOfMemory = 1005,
}

impl FatalCode {
    pub const fn number(self) -> u16 {
        self as u16
    }

    pub const fn message(self) -> &'static str {
        match self {
            FatalCode::NoInputFile => "no input file",
            FatalCode::CannotOpen => "cannot open source file",
            FatalCode::CannotRead => "cannot read source file",
            FatalCode::CannotClose => "cannot close source file",
            FatalCode::OutOfMemory => "out of memory",
        }
    }
}

impl fmt::Display for FatalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Severity::Fatal.prefix(), self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_sit_in_their_category_range() {
        for d in DIAGNOSTICS {
            let n = d.code.number();
            match d.severity {
                Severity::Warning => assert!((1000..2000).contains(&n), "{:?}", d.code),
                Severity::Error => assert!((2000..4000).contains(&n), "{:?}", d.code),
                Severity::Fatal => panic!("fatal codes live in FatalCode"),
            }
        }
    }

    #[test]
    fn numbers_are_unique_and_round_trip() {
        for d in DIAGNOSTICS {
            assert_eq!(from_number(d.code.number()), Some(d.code));
        }
    }

    #[test]
    fn unknown_number_falls_back_to_the_number() {
        assert_eq!(describe_number(4242), "4242");
        assert_eq!(
            describe_number(2002),
            "E2002: string literal is not terminated"
        );
    }

    #[test]
    fn codes_render_with_severity_prefix() {
        assert_eq!(DiagnosticCode::UnknownEscapeSequence.to_string(), "W1001");
        assert_eq!(DiagnosticCode::UseOfUndeclaredIdentifier.to_string(), "E3501");
        assert_eq!(FatalCode::CannotRead.to_string(), "F1003");
    }
}
