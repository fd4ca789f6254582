//! Property-based tests for the Lark front end
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use lark::diagnostics::Diagnostics;
use lark::scanner::{self, TokenKind};
use lark_core::lang::keywords::{self, KEYWORDS};
use proptest::prelude::*;

fn lex_str(source: &str) -> (Result<Vec<scanner::Token>, lark::diagnostics::Reported>, Diagnostics) {
    let chars: Vec<char> = source.chars().collect();
    let mut diags = Diagnostics::new("prop.lark");
    let result = scanner::lex(&chars, &mut diags);
    (result, diags)
}

// =============================================================================
// Keyword Properties
// =============================================================================

#[cfg(test)]
mod keyword_tests {
    use super::*;

    /// Property: every registered spelling resolves to its own id
    #[test]
    fn every_keyword_looks_up_to_itself() {
        for info in KEYWORDS {
            assert_eq!(keywords::lookup(info.canonical), Some(info.id), "{}", info.canonical);
        }
    }

    /// Property: keywords never scan as identifiers
    #[test]
    fn every_keyword_scans_as_reserved_word() {
        for info in KEYWORDS {
            let (tokens, diags) = lex_str(info.canonical);
            let tokens = tokens.unwrap_or_else(|_| panic!("{}", diags.render_all()));
            assert!(
                !matches!(tokens[0].kind, TokenKind::Ident(_)),
                "`{}` scanned as an identifier",
                info.canonical
            );
        }
    }
}

// =============================================================================
// Scanner Properties
// =============================================================================

#[cfg(test)]
mod scanner_properties {
    use super::*;

    fn word_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z_][a-zA-Z0-9_]{0,11}"
    }

    proptest! {
        /// Property: a word is a keyword exactly when the registry says so
        #[test]
        fn words_partition_into_keywords_and_identifiers(word in word_strategy()) {
            let (tokens, _) = lex_str(&word);
            let tokens = tokens.expect("words always scan");
            prop_assert_eq!(tokens.len(), 2);
            match (&tokens[0].kind, keywords::lookup(&word)) {
                (TokenKind::Ident(name), None) => prop_assert_eq!(name, &word),
                (TokenKind::Ident(_), Some(_)) => prop_assert!(false, "keyword `{}` scanned as identifier", word),
                (_, None) => prop_assert!(false, "identifier `{}` scanned as reserved word", word),
                (_, Some(_)) => {}
            }
        }

        /// Property: a non-ASCII letter or digit is reported, skipped, and scanning carries on
        #[test]
        fn non_ascii_word_characters_are_wrong_characters(
            c in any::<char>().prop_filter("non-ASCII letter or digit", |c| c.is_alphanumeric() && !c.is_ascii())
        ) {
            let source = format!("x{c}y");
            let (result, diags) = lex_str(&source);
            prop_assert!(result.is_err());
            prop_assert_eq!(diags.codes(), vec![lark_core::diagnostics::DiagnosticCode::WrongCharacter]);

            let chars: Vec<char> = source.chars().collect();
            let mut diags = Diagnostics::new("prop.lark");
            let mut scanner = scanner::Scanner::new(&chars);
            let first = scanner.next_token(&mut diags).expect("scan failed");
            let second = scanner.next_token(&mut diags).expect("scan failed");
            prop_assert_eq!(first.kind, TokenKind::Ident("x".to_string()));
            prop_assert_eq!(second.kind, TokenKind::Ident("y".to_string()));
            prop_assert_eq!(second.location.column, 2);
        }

        /// Property: locations count lines from 1 and columns from 0, in code points
        #[test]
        fn token_location_follows_leading_whitespace(lines in 0u32..5, blanks in 0u32..20) {
            let source = format!("{}{}x", "\n".repeat(lines as usize), " ".repeat(blanks as usize));
            let (tokens, _) = lex_str(&source);
            let tokens = tokens.expect("scan failed");
            prop_assert_eq!(tokens[0].location.line, lines + 1);
            prop_assert_eq!(tokens[0].location.column, blanks);
        }

        /// Property: a quoted string scans back to the same value without warnings
        #[test]
        fn quoted_strings_scan_back_unchanged(value in "\\PC{0,32}|[\\n\\r\\t\\\\\"a]{0,16}") {
            let (tokens, diags) = lex_str(&scanner::quote(&value));
            let tokens = tokens.expect("quoted string must scan");
            prop_assert_eq!(&tokens[0].kind, &TokenKind::String(value));
            prop_assert!(diags.is_empty());
        }

        /// Property: integer literals in range scan to their value
        #[test]
        fn integer_literals_round_trip(value in 0i64..=i64::MAX) {
            let (tokens, _) = lex_str(&value.to_string());
            let tokens = tokens.expect("in-range integer must scan");
            prop_assert_eq!(&tokens[0].kind, &TokenKind::Int(value));
        }
    }
}

// =============================================================================
// Parser Properties
// =============================================================================

#[cfg(test)]
mod parser_properties {
    use super::*;

    /// Source made of Lark-looking fragments, so the parser gets deep into its grammar.
    fn fragment_soup() -> impl Strategy<Value = String> {
        let fragment = prop::sample::select(vec![
            "x", "y", "1", "2.5", "\"s\"", "nil", "this", "=", "+", "-", "*", "&&", "<", "(", ")",
            "[", "]", "{", "}", ",", ":", ".", "if", "then", "else", "elseif", "end", "while", "do",
            "for", "foreach", "in", "case", "when", "routine", "class", "package", "return",
            "break", "next", "import", "\n",
        ]);
        prop::collection::vec(fragment, 0..48).prop_map(|parts| parts.join(" "))
    }

    proptest! {
        /// Property: the parser reports instead of panicking on arbitrary text
        #[test]
        fn parser_never_panics_on_arbitrary_text(source in "\\PC{0,96}") {
            let mut diags = Diagnostics::new("fuzz.lark");
            let result = lark::parser::parse_source(&source, &mut diags);
            prop_assert_eq!(result.is_err(), diags.has_errors());
        }

        /// Property: a failed parse records exactly one syntax or lexical error
        #[test]
        fn parser_never_panics_on_token_soup(source in fragment_soup()) {
            let mut diags = Diagnostics::new("soup.lark");
            let result = lark::parser::parse_source(&source, &mut diags);
            if result.is_err() {
                prop_assert!(diags.has_errors());
            }
        }

        /// Property: the whole pipeline produces a verdict for any input
        #[test]
        fn pipeline_always_reaches_a_verdict(source in fragment_soup()) {
            let report = lark::compile_source("soup.lark", &source);
            prop_assert_eq!(report.succeeded(), !report.diagnostics.has_errors());
        }
    }
}
