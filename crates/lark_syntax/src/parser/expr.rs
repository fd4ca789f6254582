/// Expression parsing.
///
/// Precedence, loosest first:
///
/// | level | operators | associativity |
/// |-------|-----------|---------------|
/// | assignment | `=` | right |
/// | logical-or | `\|\|` | left |
/// | logical-and | `&&` | left |
/// | equality | `==` `!=` | left |
/// | relational | `<` `>` `<=` `>=` | left |
/// | bitwise-or | `\|` `^` | left |
/// | bitwise-and | `&` | left |
/// | shift | `<<` `>>` | left |
/// | additive | `+` `-` | left |
/// | multiplicative | `*` `/` `%` | left |
/// | unary | `-` `!` `~` | prefix |
/// | postfix | call, index, member | left |
///
/// The binary rungs come from [`BinaryLevel`]. One precedence-climbing loop handles all of them, so
/// a parenthesized operand costs a few stack frames instead of one per rung.
impl<'a, 'd> Parser<'a, 'd> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> PResult<Located<Expr>> {
        self.nested(|p| p.assignment())
    }

    /// `target = value`, right-associative.
    fn assignment(&mut self) -> PResult<Located<Expr>> {
        let target = self.binary(BinaryLevel::LOOSEST)?;
        if !self.check_op(OperatorId::Assign) {
            return Ok(target);
        }
        if !target.node.is_assignable() {
            let note = format!("cannot assign to {}", target.node.kind_name());
            return self.fail_at(target.location, DiagnosticCode::ExpectedLhs, note);
        }
        self.advance()?;

        let value = self.nested(|p| p.assignment())?;
        let location = target.location;
        Ok(Located::new(
            Expr::Assignment(AssignmentExpr {
                target: Required::new(target),
                value: Required::new(value),
            }),
            location,
        ))
    }

    /// Left-associative operators binding at least as tightly as `min`.
    fn binary(&mut self, min: BinaryLevel) -> PResult<Located<Expr>> {
        let chain = self.begin_chain();
        let mut left = self.unary()?;
        while let Some((op, level)) = self.binary_operator(min) {
            self.advance()?;
            self.extend_chain()?;
            let right = match level.tighter() {
                Some(next) => self.binary(next)?,
                None => self.unary()?,
            };
            let location = left.location;
            left = Located::new(Expr::binary(level, BinaryExpr::new(op, left, right)), location);
        }
        self.end_chain(chain);
        Ok(left)
    }

    /// The current token, if it is a binary operator at `min` or tighter.
    fn binary_operator(&self, min: BinaryLevel) -> Option<(OperatorId, BinaryLevel)> {
        let op = self.peek().operator_id()?;
        let level = operators::binary_level(op)?;
        (level >= min).then_some((op, level))
    }

    fn unary(&mut self) -> PResult<Located<Expr>> {
        let Some(op) = self.peek().operator_id().filter(|op| operators::is_prefix(*op)) else {
            return self.postfix();
        };
        let location = self.advance()?.location;
        let operand = self.nested(|p| p.unary())?;
        Ok(Located::new(
            Expr::Unary(UnaryExpr {
                op,
                operand: Required::new(operand),
            }),
            location,
        ))
    }

    /// A primary followed by any number of calls, index operations and member accesses.
    fn postfix(&mut self) -> PResult<Located<Expr>> {
        let chain = self.begin_chain();
        let mut expr = self.primary()?;
        loop {
            let location = expr.location;
            if self.check_punct(PunctuationId::LParen)
                || self.check_punct(PunctuationId::LBracket)
                || self.check_punct(PunctuationId::Dot)
            {
                self.extend_chain()?;
            }
            if self.match_punct(PunctuationId::LParen)? {
                let arguments = self.expression_list(PunctuationId::RParen)?;
                self.expect_punct(PunctuationId::RParen, DiagnosticCode::ExpectedRightParen)?;
                expr = Located::new(
                    Expr::Call(CallExpr {
                        callee: Required::new(expr),
                        arguments,
                    }),
                    location,
                );
            } else if self.match_punct(PunctuationId::LBracket)? {
                let index = self.expression()?;
                self.expect_punct(PunctuationId::RBracket, DiagnosticCode::ExpectedRightBracket)?;
                expr = Located::new(
                    Expr::Index(IndexExpr {
                        object: Required::new(expr),
                        index: Required::new(index),
                    }),
                    location,
                );
            } else if self.match_punct(PunctuationId::Dot)? {
                let name = self.identifier()?;
                expr = Located::new(
                    Expr::Member(MemberExpr {
                        object: Required::new(expr),
                        name,
                    }),
                    location,
                );
            } else {
                self.end_chain(chain);
                return Ok(expr);
            }
        }
    }

    fn primary(&mut self) -> PResult<Located<Expr>> {
        let location = self.current_location();
        match self.peek().kind {
            TokenKind::Keyword(KeywordId::Routine) => return self.routine_literal(),
            TokenKind::Keyword(KeywordId::Class) => return self.class_literal(),
            TokenKind::Keyword(KeywordId::Package) => return self.package_literal(),
            TokenKind::Punctuation(PunctuationId::LBracket) => return self.array_literal(),
            TokenKind::Punctuation(PunctuationId::LBrace) => return self.hash_literal(),
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance()?;
                let inner = self.expression()?;
                self.expect_punct(PunctuationId::RParen, DiagnosticCode::ExpectedRightParen)?;
                return Ok(Located::new(Expr::Parenthesized(Required::new(inner)), location));
            }
            TokenKind::Ident(_)
            | TokenKind::Int(_)
            | TokenKind::Real(_)
            | TokenKind::String(_)
            | TokenKind::Bool(_)
            | TokenKind::Nil
            | TokenKind::Keyword(KeywordId::This) => {}
            _ => return self.fail(DiagnosticCode::ExpectedExpression),
        }

        let node = match self.advance()?.kind {
            TokenKind::Ident(name) => Expr::Identifier(name),
            TokenKind::Int(value) => Expr::Integer(value),
            TokenKind::Real(value) => Expr::Real(value),
            TokenKind::String(value) => Expr::String(value),
            TokenKind::Bool(value) => Expr::Bool(value),
            TokenKind::Nil => Expr::Nil,
            _ => Expr::This,
        };
        Ok(Located::new(node, location))
    }

    /// Comma-separated expressions up to (not including) `close`.
    fn expression_list(&mut self, close: PunctuationId) -> PResult<Vec<Located<Expr>>> {
        let mut items = Vec::new();
        if self.check_punct(close) {
            return Ok(items);
        }
        loop {
            items.push(self.expression()?);
            if !self.match_punct(PunctuationId::Comma)? {
                return Ok(items);
            }
        }
    }
}
