/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
type PResult<T> = Result<T, Reported>;

/// Deepest recursion of nested statements and expressions the parser accepts.
///
/// Each level costs the parser about eight stack frames; past this depth the parse fails with
/// [`DiagnosticCode::NestingTooDeep`] instead of exhausting a 2 MB thread stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Deepest syntax tree the parser builds.
///
/// Operator and postfix chains (`a + b + c`, `f()()`) are parsed in a loop but produce left-nested
/// trees, which every pass and `Drop` walk recursively. Chain links and nesting levels both count
/// towards this bound.
pub const MAX_TREE_DEPTH: usize = 256;

/// Parser state.
///
/// ## Notes
/// - The parser holds exactly one token of lookahead (`current`) and pulls the next one from the
///   scanner when it consumes a token.
/// - Every diagnostic goes into the borrowed [`Diagnostics`]; parsing methods return
///   [`Reported`] once one has been recorded.
pub struct Parser<'a, 'd> {
    scanner: Scanner<'a>,
    diagnostics: &'d mut Diagnostics,
    current: Token,
    /// Recursion depth of `nested` productions.
    depth: usize,
    /// Upper bound on the tree depth of the node being parsed.
    level: usize,
    /// Highest `level` reached inside the innermost open chain.
    peak: usize,
}

impl<'a, 'd> Parser<'a, 'd> {
    /// Create a new parser over a buffer of code points.
    pub fn new(chars: &'a [char], diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            scanner: Scanner::new(chars),
            diagnostics,
            current: Token::new(TokenKind::Eof, Location::START),
            depth: 0,
            level: 0,
            peak: 0,
        }
    }

    /// Parse the entire unit into its top-level [`Block`].
    ///
    /// ## Errors
    /// Returns [`Reported`] if a syntax error was found, or if the scanner reported any lexical
    /// error while the unit was being read.
    pub fn parse(mut self) -> PResult<Block> {
        let errors_before = self.diagnostics.error_count();

        self.current = self.scanner.next_token(self.diagnostics)?;
        let unit = self.block()?;
        if !self.is_at_end() {
            return self.fail(DiagnosticCode::ExpectedEndOfFile);
        }

        if self.diagnostics.error_count() > errors_before {
            return Err(Reported);
        }
        Ok(unit)
    }
}
