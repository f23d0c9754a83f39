/// Expression parsing.
///
/// Binary tiers come from the operator registry, lowest first:
/// - comparison (`==` `!=` `<` `<=` `>` `>=`)
/// - additive (`+` `-` `||`)
/// - multiplicative (`*` `/` `&&`)
///
/// Below those sit the prefix operators (`!`, unary `-`) and primaries (literals, identifiers, calls, array
/// elements, parenthesized expressions). Every identifier read here is resolved immediately.
///
/// Expression parsers return `None` after reporting an error; callers keep going in panic mode.
impl<'a> Parser<'a> {
    // ========================================================================
    // Binary tiers
    // ========================================================================

    fn expression(&mut self) -> Option<Spanned<Expr>> {
        self.binary(Precedence::Comparison)
    }

    /// Left-associative chain of operators at `level`.
    fn binary(&mut self, level: Precedence) -> Option<Spanned<Expr>> {
        let mut left = self.binary_operand(level)?;
        while let Some(op) = self.binary_op_at(level) {
            self.advance();
            let right = self.binary_operand(level)?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span);
        }
        Some(left)
    }

    /// Parse an operand of a `level` operator: the next tighter tier.
    fn binary_operand(&mut self, level: Precedence) -> Option<Spanned<Expr>> {
        match level {
            Precedence::Assignment | Precedence::Comparison => self.binary(Precedence::Additive),
            Precedence::Additive => self.binary(Precedence::Multiplicative),
            Precedence::Multiplicative | Precedence::Prefix => self.unary(),
        }
    }

    /// The binary operator at the current token, if it belongs to `level`.
    fn binary_op_at(&self, level: Precedence) -> Option<BinaryOp> {
        let id = self.peek().operator_id()?;
        let info = operators::info_for(id);
        if info.precedence == level && info.fixity == operators::Fixity::Infix {
            BinaryOp::from_operator(id)
        } else {
            None
        }
    }

    // ========================================================================
    // Prefix and primary
    // ========================================================================

    /// `! unary`, `- unary`, or a primary.
    fn unary(&mut self) -> Option<Spanned<Expr>> {
        let op = if self.check_op(OperatorId::Bang) {
            UnaryOp::Not
        } else if self.check_op(OperatorId::Minus) {
            UnaryOp::Neg
        } else {
            return self.primary();
        };

        let start = self.advance().span;
        let operand = self.unary()?;
        let span = start.merge(operand.span);
        Some(Spanned::new(Expr::Unary(op, Box::new(operand)), span))
    }

    fn primary(&mut self) -> Option<Spanned<Expr>> {
        let token = self.peek();
        let span = token.span;
        match &token.kind {
            TokenKind::Int(value) => {
                self.advance();
                Some(Spanned::new(Expr::Int(*value), span))
            }
            TokenKind::Char(text) => {
                self.advance();
                Some(Spanned::new(Expr::Char(text.clone()), span))
            }
            TokenKind::String(text) => {
                self.advance();
                Some(Spanned::new(Expr::String(text.clone()), span))
            }
            TokenKind::Ident(name) => {
                let ident = Ident::new(name.clone(), span);
                self.advance();
                if self.check_punct(PunctuationId::LParen) {
                    let call = self.call(ident)?;
                    Some(Spanned::new(Expr::Call(call), self.span_from(span)))
                } else if self.check_punct(PunctuationId::LBracket) {
                    self.resolve(&ident);
                    self.index(ident)
                } else {
                    self.resolve(&ident);
                    Some(Spanned::new(Expr::Ident(ident.name), span))
                }
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.expression()?;
                self.expect_punct(PunctuationId::RParen)?;
                Some(inner)
            }
            _ => {
                self.error_at_current("expected expression");
                None
            }
        }
    }

    // ========================================================================
    // Postfix forms
    // ========================================================================

    /// `callee ( [expr {, expr}] )`; the current token is `(`.
    fn call(&mut self, callee: Ident) -> Option<Call> {
        self.advance();
        self.resolve(&callee);

        let mut args = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                args.push(self.expression()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen)?;
        Some(Call { callee, args })
    }

    /// `name [ expr ]`; the current token is `[`.
    fn index(&mut self, name: Ident) -> Option<Spanned<Expr>> {
        self.advance();
        let index = self.expression()?;
        self.expect_punct(PunctuationId::RBracket)?;
        let span = self.span_from(name.span);
        Some(Spanned::new(Expr::Index(name, Box::new(index)), span))
    }
}
