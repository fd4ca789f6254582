//! Scanner for the Lark programming language
//!
//! Turns a buffer of code points into tokens, one at a time, on demand:
//! - Keywords (reserved words of 2 to 7 characters, matched by length bucket)
//! - Identifiers and literals (integer, real, string, bool, nil)
//! - Operators (single and two-character) and punctuation
//! - `#` line comments and Unicode whitespace/line breaks
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String literal scanning and escapes
//! - `numbers` - Integer/real literal scanning
//!
//! ## Notes
//! - The scanner is forward-only and never backtracks; the parser pulls exactly one token at a
//!   time.
//! - A wrong character is reported and skipped; scanning continues with the next code point.
//! - An unterminated string or an oversized integer literal fails the token: the scanner returns
//!   [`Reported`] and the caller decides whether to keep going.

mod numbers;
mod strings;
pub mod tokens;

pub use strings::quote;
pub use tokens::{Token, TokenKind};

use lark_core::diagnostics::DiagnosticCode;
use lark_core::lang::keywords;
use lark_core::lang::operators::{self, OperatorId};
use lark_core::lang::punctuation;

use crate::diagnostics::{Diagnostics, Reported};
use crate::location::Location;

/// Forward-only tokenizer over one source unit.
///
/// The scanner state is just `(offset, location)`; [`Scanner::resume`] rebuilds a scanner from a
/// saved pair, so callers can scan a single token at a time without holding the scanner.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    chars: &'a [char],
    offset: usize,
    location: Location,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `chars`.
    pub fn new(chars: &'a [char]) -> Self {
        Self::resume(chars, 0, Location::START)
    }

    /// Create a scanner positioned at a previously returned `(offset, location)` pair.
    pub fn resume(chars: &'a [char], offset: usize, location: Location) -> Self {
        Self {
            chars,
            offset: offset.min(chars.len()),
            location,
        }
    }

    /// Index of the next code point to be scanned.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Location of the next code point to be scanned.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Scan the next token.
    ///
    /// Skips whitespace and comments, reports and skips wrong characters, and returns
    /// [`TokenKind::Eof`] (repeatedly) once the buffer is exhausted.
    pub fn next_token(&mut self, diagnostics: &mut Diagnostics) -> Result<Token, Reported> {
        loop {
            let Some(c) = self.peek() else {
                return Ok(Token::new(TokenKind::Eof, self.location));
            };
            let start = self.location;

            match c {
                '#' => self.skip_comment(),
                c if is_line_break(c) => self.bump_line(),
                c if is_blank(c) => self.bump(),
                '"' => return self.scan_string(start, diagnostics),
                '0'..='9' => return self.scan_number(start, diagnostics),
                c if is_ident_start(c) => return Ok(self.scan_word(start)),
                c => match self.scan_symbol(c) {
                    Some(kind) => return Ok(Token::new(kind, start)),
                    None => {
                        diagnostics.error_with(
                            start,
                            DiagnosticCode::WrongCharacter,
                            format!("unexpected character {:?} (U+{:04X})", c, c as u32),
                        );
                        self.bump();
                    }
                },
            }
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&self) -> Option<char> {
        self.chars.get(self.offset).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.offset + 1).copied()
    }

    /// Consume one code point on the current line.
    fn bump(&mut self) {
        self.offset += 1;
        self.location.advance(1);
    }

    /// Consume one line-break code point.
    fn bump_line(&mut self) {
        self.offset += 1;
        self.location.next_line();
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if is_line_break(c) {
                break;
            }
            self.bump();
        }
    }

    // ========================================================================
    // Words and symbols
    // ========================================================================

    /// Scan an identifier-shaped run and classify it.
    ///
    /// Runs containing a digit or `_` can never be keywords, so they skip the keyword table.
    fn scan_word(&mut self, start: Location) -> Token {
        let begin = self.offset;
        let mut plain = true;
        while let Some(c) = self.peek() {
            if !is_ident_continue(c) {
                break;
            }
            plain &= c.is_ascii_alphabetic();
            self.bump();
        }
        let text: String = self.chars[begin..self.offset].iter().collect();

        let kind = if plain {
            keywords::lookup(&text).map(tokens::keyword_token)
        } else {
            None
        };
        Token::new(kind.unwrap_or(TokenKind::Ident(text)), start)
    }

    /// Scan an operator or punctuation token starting with `c`.
    fn scan_symbol(&mut self, c: char) -> Option<TokenKind> {
        if let Some(id) = self.peek_next().and_then(|next| two_char_operator(c, next)) {
            self.bump();
            self.bump();
            return Some(TokenKind::Operator(id));
        }

        let kind = if let Some(id) = operators::from_char(c) {
            TokenKind::Operator(id)
        } else {
            TokenKind::Punctuation(punctuation::from_char(c)?)
        };
        self.bump();
        Some(kind)
    }
}

/// Scan one token starting at `(offset, location)`.
///
/// Returns the token together with the offset and location just past it, ready to be passed back
/// in for the following token.
pub fn scan(
    chars: &[char],
    offset: usize,
    location: Location,
    diagnostics: &mut Diagnostics,
) -> Result<(Token, usize, Location), Reported> {
    let mut scanner = Scanner::resume(chars, offset, location);
    let token = scanner.next_token(diagnostics)?;
    Ok((token, scanner.offset(), scanner.location()))
}

/// Tokenize a whole buffer.
///
/// Keeps scanning past failed tokens so every lexical problem in the unit gets reported.
///
/// ## Returns
/// - `Ok(tokens)` ending with [`TokenKind::Eof`] when no errors were reported.
/// - `Err(Reported)` when at least one lexical error was recorded.
#[tracing::instrument(skip_all, fields(source_len = chars.len()))]
pub fn lex(chars: &[char], diagnostics: &mut Diagnostics) -> Result<Vec<Token>, Reported> {
    let errors_before = diagnostics.error_count();
    let mut scanner = Scanner::new(chars);
    let mut tokens = Vec::new();

    loop {
        match scanner.next_token(diagnostics) {
            Ok(token) => {
                let done = token.kind == TokenKind::Eof;
                tokens.push(token);
                if done {
                    break;
                }
            }
            Err(Reported) => continue,
        }
    }

    tracing::debug!(tokens = tokens.len(), "scanned");
    if diagnostics.error_count() > errors_before {
        Err(Reported)
    } else {
        Ok(tokens)
    }
}

// ============================================================================
// Character classes
// ============================================================================

/// Whitespace that does not end a line: ASCII blanks plus the Unicode space separators.
pub fn is_blank(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Code points that start a new line. A CR before LF is skipped as a blank.
pub fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Identifiers are ASCII only; other letters and digits are wrong characters.
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn two_char_operator(first: char, second: char) -> Option<OperatorId> {
    match (first, second) {
        ('<', '<') => Some(OperatorId::ShiftLeft),
        ('>', '>') => Some(OperatorId::ShiftRight),
        ('<', '=') => Some(OperatorId::LessEqual),
        ('>', '=') => Some(OperatorId::GreaterEqual),
        ('=', '=') => Some(OperatorId::EqualEqual),
        ('!', '=') => Some(OperatorId::NotEqual),
        ('&', '&') => Some(OperatorId::AndAnd),
        ('|', '|') => Some(OperatorId::OrOr),
        _ => None,
    }
}
