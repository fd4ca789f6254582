//! Numeric literal scanning.
//!
//! - Integers are runs of ASCII decimal digits and must fit in an `i64`.
//! - Reals are `digits.digits`; a `.` not followed by a digit is left for the next token (member
//!   access).

use lark_core::diagnostics::DiagnosticCode;

use super::{Scanner, Token, TokenKind};
use crate::diagnostics::{Diagnostics, Reported};
use crate::location::Location;

impl Scanner<'_> {
    /// Scan an integer or real literal. The current code point is an ASCII digit.
    pub(super) fn scan_number(
        &mut self,
        start: Location,
        diagnostics: &mut Diagnostics,
    ) -> Result<Token, Reported> {
        let mut integer = Some(0i64);
        let mut whole = 0f64;
        while let Some(digit) = self.peek_digit() {
            integer = integer
                .and_then(|v| v.checked_mul(10))
                .and_then(|v| v.checked_add(i64::from(digit)));
            whole = whole * 10.0 + f64::from(digit);
            self.bump();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            let mut fraction = 0f64;
            let mut scale = 1f64;
            while let Some(digit) = self.peek_digit() {
                fraction = fraction * 10.0 + f64::from(digit);
                scale *= 10.0;
                self.bump();
            }
            return Ok(Token::new(TokenKind::Real(whole + fraction / scale), start));
        }

        match integer {
            Some(value) => Ok(Token::new(TokenKind::Int(value), start)),
            None => {
                diagnostics.error(start, DiagnosticCode::IntegerLiteralTooLarge);
                Err(Reported)
            }
        }
    }

    fn peek_digit(&self) -> Option<u32> {
        self.peek().and_then(|c| c.to_digit(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lark_core::lang::punctuation::PunctuationId;

    fn scan_all(source: &str) -> (Vec<Result<TokenKind, Reported>>, Diagnostics) {
        let chars: Vec<char> = source.chars().collect();
        let mut diags = Diagnostics::new("num.lark");
        let mut scanner = Scanner::new(&chars);
        let mut out = Vec::new();
        loop {
            let result = scanner.next_token(&mut diags).map(|t| t.kind);
            if result == Ok(TokenKind::Eof) {
                break;
            }
            out.push(result);
        }
        (out, diags)
    }

    #[test]
    fn test_integers_and_reals() {
        let (tokens, diags) = scan_all("0 42 3.25 10.5");
        assert_eq!(
            tokens,
            vec![
                Ok(TokenKind::Int(0)),
                Ok(TokenKind::Int(42)),
                Ok(TokenKind::Real(3.25)),
                Ok(TokenKind::Real(10.5)),
            ]
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_dot_without_digit_is_member_access() {
        let (tokens, _) = scan_all("1.x");
        assert_eq!(
            tokens,
            vec![
                Ok(TokenKind::Int(1)),
                Ok(TokenKind::Punctuation(PunctuationId::Dot)),
                Ok(TokenKind::Ident("x".to_string())),
            ]
        );
    }

    #[test]
    fn test_i64_max_fits() {
        let (tokens, diags) = scan_all("9223372036854775807");
        assert_eq!(tokens, vec![Ok(TokenKind::Int(i64::MAX))]);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_overflow_is_reported_and_consumed() {
        let (tokens, diags) = scan_all("9223372036854775808 7");
        assert_eq!(tokens, vec![Err(Reported), Ok(TokenKind::Int(7))]);
        assert_eq!(diags.codes(), vec![DiagnosticCode::IntegerLiteralTooLarge]);
    }

    #[test]
    fn test_large_real_does_not_overflow() {
        let (tokens, diags) = scan_all("99999999999999999999.5");
        assert!(diags.is_empty());
        match &tokens[..] {
            [Ok(TokenKind::Real(value))] => assert!((value - 1e20).abs() < 1e6),
            other => panic!("unexpected tokens: {:?}", other),
        }
    }
}
