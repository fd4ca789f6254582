/// Compound literal parsing: routines, classes, packages, arrays and hashes.
///
/// Routines, classes and packages are expressions; giving one a name means assigning it
/// (`add = routine(a, b) return a + b end`). Classes and packages additionally carry their own name.
impl<'a, 'd> Parser<'a, 'd> {
    // ========================================================================
    // Routines and parameters
    // ========================================================================

    /// `routine(params) block end`
    fn routine_literal(&mut self) -> PResult<Located<Expr>> {
        let location = self.advance()?.location;
        let parameters = self.parameter_list()?;
        let body = self.block_until_end()?;
        Ok(Located::new(
            Expr::Routine(RoutineLiteral {
                parameters,
                body: Required::new(body),
            }),
            location,
        ))
    }

    /// `( [param {, param}] )`
    fn parameter_list(&mut self) -> PResult<Vec<Located<Parameter>>> {
        self.expect_punct(PunctuationId::LParen, DiagnosticCode::ExpectedLeftParen)?;
        let mut parameters = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                parameters.push(self.parameter()?);
                if !self.match_punct(PunctuationId::Comma)? {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen, DiagnosticCode::ExpectedRightParen)?;
        Ok(parameters)
    }

    /// `name [= default]` or `out name`
    fn parameter(&mut self) -> PResult<Located<Parameter>> {
        let location = self.current_location();
        if self.match_keyword(KeywordId::Out)? {
            let name = self.identifier()?;
            if self.check_op(OperatorId::Assign) {
                let note = format!("`out {}` cannot have a default", name);
                let at = self.current_location();
                return self.fail_at(at, DiagnosticCode::OutputParameterDefaultArgument, note);
            }
            return Ok(Located::new(Parameter::Output(OutputParameter { name }), location));
        }

        let name = self.identifier()?;
        let default = if self.match_op(OperatorId::Assign)? {
            Some(Box::new(self.expression()?))
        } else {
            None
        };
        Ok(Located::new(Parameter::Value(ValueParameter { name, default }), location))
    }

    // ========================================================================
    // Classes and packages
    // ========================================================================

    /// `class Name(params) [: Base(args)] [include P {, P}] block {public|private block} end`
    fn class_literal(&mut self) -> PResult<Located<Expr>> {
        let location = self.advance()?.location;
        let name = self.identifier()?;
        let parameters = self.parameter_list()?;

        let base = if self.match_punct(PunctuationId::Colon)? {
            let base_name = self.located_identifier()?;
            self.expect_punct(PunctuationId::LParen, DiagnosticCode::ExpectedLeftParen)?;
            let arguments = self.expression_list(PunctuationId::RParen)?;
            self.expect_punct(PunctuationId::RParen, DiagnosticCode::ExpectedRightParen)?;
            Some(BaseClass {
                name: base_name,
                arguments,
            })
        } else {
            None
        };

        let mut includes = Vec::new();
        if self.match_keyword(KeywordId::Include)? {
            includes.push(self.located_identifier()?);
            while self.match_punct(PunctuationId::Comma)? {
                includes.push(self.located_identifier()?);
            }
        }

        let mut sections = vec![self.class_section(Access::Public)?];
        loop {
            let access = match self.peek().keyword_id() {
                Some(KeywordId::Public) => Access::Public,
                Some(KeywordId::Private) => Access::Private,
                _ => break,
            };
            self.advance()?;
            sections.push(self.class_section(access)?);
        }
        self.expect_keyword(KeywordId::End, DiagnosticCode::ExpectedEnd)?;

        Ok(Located::new(
            Expr::Class(ClassLiteral {
                name,
                parameters,
                base,
                includes,
                sections,
            }),
            location,
        ))
    }

    fn class_section(&mut self, access: Access) -> PResult<ClassSection> {
        let location = self.current_location();
        let body = self.block()?;
        Ok(ClassSection {
            access,
            body: Required::new(body),
            location,
        })
    }

    /// `package Name block end`
    fn package_literal(&mut self) -> PResult<Located<Expr>> {
        let location = self.advance()?.location;
        let name = self.identifier()?;
        let body = self.block_until_end()?;
        Ok(Located::new(
            Expr::Package(PackageLiteral {
                name,
                body: Required::new(body),
            }),
            location,
        ))
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// `[ [expr {, expr}] ]`
    fn array_literal(&mut self) -> PResult<Located<Expr>> {
        let location = self.advance()?.location;
        let elements = self.expression_list(PunctuationId::RBracket)?;
        self.expect_punct(PunctuationId::RBracket, DiagnosticCode::ExpectedRightBracket)?;
        Ok(Located::new(Expr::Array(ArrayLiteral { elements }), location))
    }

    /// `{ [key: value {, key: value}] }`
    fn hash_literal(&mut self) -> PResult<Located<Expr>> {
        let location = self.advance()?.location;
        let mut pairs = Vec::new();
        if !self.check_punct(PunctuationId::RBrace) {
            loop {
                let key = self.expression()?;
                self.expect_punct(PunctuationId::Colon, DiagnosticCode::ExpectedColon)?;
                let value = self.expression()?;
                pairs.push(HashPair {
                    location: key.location,
                    key: Required::new(key),
                    value: Required::new(value),
                });
                if !self.match_punct(PunctuationId::Comma)? {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RBrace, DiagnosticCode::ExpectedRightBrace)?;
        Ok(Located::new(Expr::Hash(HashLiteral { pairs }), location))
    }
}
