/// Statement and block parsing.
///
/// Compound statements share one shape: a keyword, a header, a body block, and a closing `end`.
/// Bodies run until a block terminator (see [`TokenKind::is_block_terminator`]).
impl<'a, 'd> Parser<'a, 'd> {
    // ========================================================================
    // Blocks
    // ========================================================================

    /// Parse statements until a block terminator.
    fn block(&mut self) -> PResult<Block> {
        let location = self.current_location();
        let mut statements = Vec::new();
        while !self.peek().kind.is_block_terminator() {
            statements.push(self.statement()?);
        }
        Ok(Block::new(statements, location))
    }

    /// Parse a block and the `end` that closes it.
    fn block_until_end(&mut self) -> PResult<Block> {
        let body = self.block()?;
        self.expect_keyword(KeywordId::End, DiagnosticCode::ExpectedEnd)?;
        Ok(body)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self) -> PResult<Located<Statement>> {
        self.nested(|p| {
            let location = p.current_location();
            let stmt = match p.peek().keyword_id() {
                Some(KeywordId::Import) => p.import_stmt()?,
                Some(KeywordId::If) => p.if_stmt()?,
                Some(KeywordId::Case) => p.case_stmt()?,
                Some(KeywordId::While) => p.while_stmt()?,
                Some(KeywordId::For) => p.for_stmt()?,
                Some(KeywordId::Foreach) => p.foreach_stmt()?,
                Some(KeywordId::Break) => {
                    p.advance()?;
                    Statement::Break
                }
                Some(KeywordId::Next) => {
                    p.advance()?;
                    Statement::Next
                }
                Some(KeywordId::Return) => p.return_stmt()?,
                _ => Statement::Expression(Required::new(p.expression()?)),
            };
            Ok(Located::new(stmt, location))
        })
    }

    /// `import a.b.c`
    fn import_stmt(&mut self) -> PResult<Statement> {
        self.advance()?;
        let mut path = vec![self.identifier()?];
        while self.match_punct(PunctuationId::Dot)? {
            path.push(self.identifier()?);
        }
        Ok(Statement::Import(ImportStmt { path }))
    }

    /// `if c block {elseif c block} [else block] end`
    fn if_stmt(&mut self) -> PResult<Statement> {
        self.advance()?;
        let condition = self.expression()?;
        let then_body = self.block()?;

        let mut elseif_branches = Vec::new();
        while self.check_keyword(KeywordId::Elseif) {
            let location = self.advance()?.location;
            let condition = self.expression()?;
            let body = self.block()?;
            elseif_branches.push(ElseIfBranch {
                condition: Required::new(condition),
                body: Required::new(body),
                location,
            });
        }

        let else_body = if self.match_keyword(KeywordId::Else)? {
            Some(self.block()?)
        } else {
            None
        };
        self.expect_keyword(KeywordId::End, DiagnosticCode::ExpectedEnd)?;

        Ok(Statement::If(IfStmt {
            condition: Required::new(condition),
            then_body: Required::new(then_body),
            elseif_branches,
            else_body,
        }))
    }

    /// `case v when c then block {when c then block} [else block] end`
    fn case_stmt(&mut self) -> PResult<Statement> {
        self.advance()?;
        let subject = self.expression()?;
        if !self.check_keyword(KeywordId::When) {
            return self.fail(DiagnosticCode::ExpectedWhen);
        }

        let mut whens = Vec::new();
        while self.check_keyword(KeywordId::When) {
            let location = self.advance()?.location;
            let condition = self.expression()?;
            self.expect_keyword(KeywordId::Then, DiagnosticCode::ExpectedThen)?;
            let body = self.block()?;
            whens.push(WhenClause {
                condition: Required::new(condition),
                body: Required::new(body),
                location,
            });
        }

        let else_body = if self.match_keyword(KeywordId::Else)? {
            Some(self.block()?)
        } else {
            None
        };
        self.expect_keyword(KeywordId::End, DiagnosticCode::ExpectedEnd)?;

        Ok(Statement::Case(CaseStmt {
            subject: Required::new(subject),
            whens,
            else_body,
        }))
    }

    /// `while c do block end`
    fn while_stmt(&mut self) -> PResult<Statement> {
        self.advance()?;
        let condition = self.expression()?;
        self.expect_keyword(KeywordId::Do, DiagnosticCode::ExpectedDo)?;
        let body = self.block_until_end()?;
        Ok(Statement::While(WhileStmt {
            condition: Required::new(condition),
            body: Required::new(body),
        }))
    }

    /// `for init, cond, step do block end`
    fn for_stmt(&mut self) -> PResult<Statement> {
        self.advance()?;
        let init = self.expression()?;
        self.expect_punct(PunctuationId::Comma, DiagnosticCode::ExpectedComma)?;
        let condition = self.expression()?;
        self.expect_punct(PunctuationId::Comma, DiagnosticCode::ExpectedComma)?;
        let step = self.expression()?;
        self.expect_keyword(KeywordId::Do, DiagnosticCode::ExpectedDo)?;
        let body = self.block_until_end()?;
        Ok(Statement::For(ForStmt {
            init: Required::new(init),
            condition: Required::new(condition),
            step: Required::new(step),
            body: Required::new(body),
        }))
    }

    /// `foreach x in coll do block end`
    fn foreach_stmt(&mut self) -> PResult<Statement> {
        self.advance()?;
        let variable = self.located_identifier()?;
        self.expect_keyword(KeywordId::In, DiagnosticCode::ExpectedIn)?;
        let collection = self.expression()?;
        self.expect_keyword(KeywordId::Do, DiagnosticCode::ExpectedDo)?;
        let body = self.block_until_end()?;
        Ok(Statement::Foreach(ForeachStmt {
            variable,
            collection: Required::new(collection),
            body: Required::new(body),
        }))
    }

    /// `return [expr]`
    ///
    /// The value is only parsed when it starts on the same line as `return`.
    fn return_stmt(&mut self) -> PResult<Statement> {
        let line = self.advance()?.location.line;
        let value = if self.peek().kind.starts_expression() && self.current_location().line == line {
            Some(Box::new(self.expression()?))
        } else {
            None
        };
        Ok(Statement::Return(value))
    }
}
