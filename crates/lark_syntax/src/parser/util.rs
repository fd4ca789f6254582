/// Miscellaneous parser utilities.
///
/// Identifier parsing shared by statements, literals and postfix member access.
impl<'a, 'd> Parser<'a, 'd> {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn identifier(&mut self) -> PResult<Ident> {
        Ok(self.located_identifier()?.node)
    }

    fn located_identifier(&mut self) -> PResult<Located<Ident>> {
        if !matches!(self.peek().kind, TokenKind::Ident(_)) {
            return self.fail(DiagnosticCode::ExpectedIdentifier);
        }
        let token = self.advance()?;
        match token.kind {
            TokenKind::Ident(name) => Ok(Located::new(name, token.location)),
            _ => self.fail(DiagnosticCode::ExpectedIdentifier),
        }
    }
}
