/// Statement parsing.
///
/// Statements are appended to the enclosing statement list. A braced block does not create a node of its own: its
/// statements are flattened into the parent list, since cmm has no block scopes.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    /// Parse one statement into `out`.
    ///
    /// This is the statement-level synchronization boundary: a pending panic is resolved here before anything else.
    fn statement(&mut self, out: &mut Vec<Spanned<Statement>>) {
        if self.panicking {
            self.synchronize();
            if self.panicking {
                return;
            }
        }

        let token = self.peek();
        match &token.kind {
            TokenKind::Keyword(KeywordId::If) => self.if_statement(out),
            TokenKind::Keyword(KeywordId::While) => self.while_statement(out),
            TokenKind::Keyword(KeywordId::For) => self.for_statement(out),
            TokenKind::Keyword(KeywordId::Return) => self.return_statement(out),
            TokenKind::Punctuation(PunctuationId::LBrace) => self.block(out),
            TokenKind::Punctuation(PunctuationId::Semicolon) => {
                self.advance();
            }
            TokenKind::Ident(_) => self.ident_statement(out),
            _ => {
                self.unexpected_token();
                self.advance();
            }
        }
    }

    /// `{ stmt* }`, flattened into `out`.
    fn block(&mut self, out: &mut Vec<Spanned<Statement>>) {
        self.advance();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            self.statement(out);
        }
        self.expect_punct(PunctuationId::RBrace);
    }

    /// A single statement as the body of `if`/`else`/`while`/`for`.
    fn sub_statement(&mut self) -> Vec<Spanned<Statement>> {
        let mut body = Vec::new();
        self.statement(&mut body);
        body
    }

    /// `if ( expr ) stmt [else stmt]`
    fn if_statement(&mut self, out: &mut Vec<Spanned<Statement>>) {
        let start = self.advance().span;
        if self.expect_punct(PunctuationId::LParen).is_none() {
            return;
        }
        let condition = self.expression();
        self.expect_punct(PunctuationId::RParen);

        let then_body = self.sub_statement();
        let else_body = if self.match_keyword(KeywordId::Else) {
            self.sub_statement()
        } else {
            Vec::new()
        };

        if let Some(condition) = condition {
            let stmt = Statement::If(IfStmt {
                condition,
                then_body,
                else_body,
            });
            out.push(Spanned::new(stmt, self.span_from(start)));
        }
    }

    /// `while ( expr ) stmt`
    fn while_statement(&mut self, out: &mut Vec<Spanned<Statement>>) {
        let start = self.advance().span;
        if self.expect_punct(PunctuationId::LParen).is_none() {
            return;
        }
        let condition = self.expression();
        self.expect_punct(PunctuationId::RParen);
        let body = self.sub_statement();

        if let Some(condition) = condition {
            let stmt = Statement::While(WhileStmt { condition, body });
            out.push(Spanned::new(stmt, self.span_from(start)));
        }
    }

    /// `for ( [assign] ; [expr] ; [assign] ) stmt`
    fn for_statement(&mut self, out: &mut Vec<Spanned<Statement>>) {
        let start = self.advance().span;
        if self.expect_punct(PunctuationId::LParen).is_none() {
            return;
        }

        let init = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else {
            self.assignment()
        };
        self.expect_punct(PunctuationId::Semicolon);

        let condition = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else {
            self.expression()
        };
        self.expect_punct(PunctuationId::Semicolon);

        let increment = if self.check_punct(PunctuationId::RParen) {
            None
        } else {
            self.assignment()
        };
        self.expect_punct(PunctuationId::RParen);

        let body = self.sub_statement();
        let stmt = Statement::For(ForStmt {
            init,
            condition,
            increment,
            body,
        });
        out.push(Spanned::new(stmt, self.span_from(start)));
    }

    /// `return [expr] ;`
    fn return_statement(&mut self, out: &mut Vec<Spanned<Statement>>) {
        let start = self.advance().span;
        let value = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else {
            self.expression()
        };
        self.expect_punct(PunctuationId::Semicolon);
        out.push(Spanned::new(Statement::Return(value), self.span_from(start)));
    }

    /// A statement starting with an identifier: `f(args);` or `target = expr;`.
    fn ident_statement(&mut self, out: &mut Vec<Spanned<Statement>>) {
        let start = self.current_span();
        if self.peek_next().kind.is_punctuation(PunctuationId::LParen) {
            let Some(callee) = self.expect_ident() else {
                return;
            };
            let call = self.call(callee);
            self.expect_punct(PunctuationId::Semicolon);
            if let Some(call) = call {
                out.push(Spanned::new(Statement::Call(call), self.span_from(start)));
            }
            return;
        }

        let assign = self.assignment();
        self.expect_punct(PunctuationId::Semicolon);
        if let Some(assign) = assign {
            out.push(Spanned::new(Statement::Assign(assign.node), assign.span));
        }
    }

    /// `name = expr` or `name[expr] = expr`, without the trailing `;`.
    fn assignment(&mut self) -> Option<Spanned<Assign>> {
        let start = self.current_span();
        let name = self.expect_ident()?;
        self.resolve(&name);

        let target = if self.check_punct(PunctuationId::LBracket) {
            self.index(name)?
        } else {
            let span = name.span;
            Spanned::new(Expr::Ident(name.name), span)
        };

        self.expect_op(OperatorId::Eq)?;
        let value = self.expression()?;
        Some(Spanned::new(Assign { target, value }, self.span_from(start)))
    }
}
