/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Failure reporting and the nesting guard
impl<'a, 'd> Parser<'a, 'd> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        &self.current
    }

    /// Consume the current token and return it.
    ///
    /// ## Errors
    /// Fails if scanning the following token fails.
    fn advance(&mut self) -> PResult<Token> {
        let next = self.scanner.next_token(self.diagnostics)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is the given operator.
    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> PResult<bool> {
        if self.check_keyword(id) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> PResult<bool> {
        if self.check_punct(id) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn match_op(&mut self, id: OperatorId) -> PResult<bool> {
        if self.check_op(id) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, code: DiagnosticCode) -> PResult<Token> {
        if self.check_keyword(id) {
            self.advance()
        } else {
            self.fail(code)
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, code: DiagnosticCode) -> PResult<Token> {
        if self.check_punct(id) {
            self.advance()
        } else {
            self.fail(code)
        }
    }

    fn current_location(&self) -> Location {
        self.peek().location
    }

    /// Report `code` at the current token and fail.
    fn fail<T>(&mut self, code: DiagnosticCode) -> PResult<T> {
        let location = self.current_location();
        let found = self.peek().kind.to_string();
        self.fail_at(location, code, format!("found {}", found))
    }

    /// Report `code` at `location` with a note and fail.
    fn fail_at<T>(&mut self, location: Location, code: DiagnosticCode, note: String) -> PResult<T> {
        tracing::debug!(%code, %location, "syntax error");
        self.diagnostics.error_with(location, code, note);
        Err(Reported)
    }

    /// Run `f` one nesting level deeper, failing once [`MAX_NESTING_DEPTH`] or [`MAX_TREE_DEPTH`]
    /// would be exceeded.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= MAX_NESTING_DEPTH || self.level >= MAX_TREE_DEPTH {
            return self.fail(DiagnosticCode::NestingTooDeep);
        }
        self.depth += 1;
        self.level += 1;
        self.peak = self.peak.max(self.level);
        let result = f(self);
        self.depth -= 1;
        self.level -= 1;
        result
    }

    /// Open a left-nested chain at the current level. Returns the state `end_chain` restores.
    fn begin_chain(&mut self) -> (usize, usize) {
        let saved = (self.level, self.peak);
        self.peak = self.level;
        saved
    }

    /// Account for one more link: the new node sits above everything the chain holds so far.
    fn extend_chain(&mut self) -> PResult<()> {
        if self.peak >= MAX_TREE_DEPTH {
            return self.fail(DiagnosticCode::NestingTooDeep);
        }
        self.level = self.peak + 1;
        self.peak = self.level;
        Ok(())
    }

    /// Close a chain; the enclosing chain keeps the deepest level this one reached.
    fn end_chain(&mut self, (level, peak): (usize, usize)) {
        self.level = level;
        self.peak = self.peak.max(peak);
    }
}
