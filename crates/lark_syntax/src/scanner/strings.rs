//! String literal scanning.
//!
//! Lark strings are double-quoted and must close on the line they open on, except that a backslash
//! directly before LF (or CR LF) continues the literal on the next line. Other Unicode line
//! separators are ordinary string content.

use lark_core::diagnostics::DiagnosticCode;

use super::{Scanner, Token, TokenKind};
use crate::diagnostics::{Diagnostics, Reported};
use crate::location::Location;

impl Scanner<'_> {
    /// Scan a string literal. The current code point is the opening quote.
    pub(super) fn scan_string(
        &mut self,
        start: Location,
        diagnostics: &mut Diagnostics,
    ) -> Result<Token, Reported> {
        self.bump();
        let mut value = String::new();

        loop {
            let Some(c) = self.peek() else {
                return unterminated(start, diagnostics);
            };
            match c {
                '"' => {
                    self.bump();
                    return Ok(Token::new(TokenKind::String(value), start));
                }
                '\\' => {
                    let escape_at = self.location;
                    self.bump();
                    let Some(escaped) = self.peek() else {
                        return unterminated(start, diagnostics);
                    };
                    if escaped == '\r' {
                        self.bump();
                        if self.peek() == Some('\n') {
                            self.bump_line();
                        } else {
                            self.location.next_line();
                        }
                    } else if escaped == '\n' {
                        self.bump_line();
                    } else {
                        self.bump();
                        match unescape(escaped) {
                            Some(ch) => value.push(ch),
                            None => {
                                diagnostics.warn(escape_at, DiagnosticCode::UnknownEscapeSequence);
                                value.push('\\');
                                value.push(escaped);
                            }
                        }
                    }
                }
                '\r' | '\n' => return unterminated(start, diagnostics),
                c => {
                    self.bump();
                    value.push(c);
                }
            }
        }
    }
}

fn unterminated(start: Location, diagnostics: &mut Diagnostics) -> Result<Token, Reported> {
    diagnostics.error(start, DiagnosticCode::StringNotTerminated);
    Err(Reported)
}

/// Decode the character after a backslash.
fn unescape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        '0' => Some('\0'),
        'r' => Some('\r'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '\\' => Some('\\'),
        'a' => Some('\u{07}'),
        'b' => Some('\u{08}'),
        'f' => Some('\u{0C}'),
        'v' => Some('\u{0B}'),
        _ => None,
    }
}

/// Render `value` as a double-quoted Lark literal that scans back to the same value.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\u{0B}' => out.push_str("\\v"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_one(source: &str) -> (Result<Token, Reported>, Diagnostics) {
        let chars: Vec<char> = source.chars().collect();
        let mut diags = Diagnostics::new("str.lark");
        let result = Scanner::new(&chars).next_token(&mut diags);
        (result, diags)
    }

    #[test]
    fn test_escapes_decode() {
        let (token, diags) = scan_one(r#""a\nb\t\"q\"\\""#);
        assert_eq!(
            token.expect("scan failed").kind,
            TokenKind::String("a\nb\t\"q\"\\".to_string())
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_unknown_escape_warns_and_keeps_text() {
        let (token, diags) = scan_one(r#""\q""#);
        assert_eq!(token.expect("scan failed").kind, TokenKind::String("\\q".to_string()));
        assert_eq!(diags.codes(), vec![DiagnosticCode::UnknownEscapeSequence]);
        assert_eq!(diags.iter().next().map(|d| d.location), Some(Location::new(1, 1)));
    }

    #[test]
    fn test_line_continuation() {
        let chars: Vec<char> = "\"ab\\\ncd\" x".chars().collect();
        let mut diags = Diagnostics::new("cont.lark");
        let mut scanner = Scanner::new(&chars);
        let token = scanner.next_token(&mut diags).expect("scan failed");
        assert_eq!(token.kind, TokenKind::String("abcd".to_string()));
        let next = scanner.next_token(&mut diags).expect("scan failed");
        assert_eq!(next.location, Location::new(2, 4));
    }

    #[test]
    fn test_raw_newline_is_unterminated() {
        let (token, diags) = scan_one("\"abc\ndef\"");
        assert_eq!(token, Err(Reported));
        assert_eq!(diags.codes(), vec![DiagnosticCode::StringNotTerminated]);
    }

    #[test]
    fn test_eof_is_unterminated() {
        let (token, diags) = scan_one("\"abc");
        assert_eq!(token, Err(Reported));
        assert_eq!(diags.codes(), vec![DiagnosticCode::StringNotTerminated]);
    }

    #[test]
    fn test_quote_round_trips() {
        let value = "tab\there \"quoted\" back\\slash\u{07}";
        let (token, _) = scan_one(&quote(value));
        assert_eq!(token.expect("scan failed").kind, TokenKind::String(value.to_string()));
    }
}
