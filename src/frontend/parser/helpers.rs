/// Token-stream helpers, diagnostics, and panic-mode recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Reporting syntax and binding errors
/// - Error recovery (`synchronize`, `synchronize_global`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` at [`TokenKind::Eof`] (or if the stream ran out without one).
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof) || self.pos + 1 >= self.tokens.len()
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        &tokens[self.pos.min(tokens.len() - 1)]
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        &tokens[(self.pos + 1).min(tokens.len() - 1)]
    }

    /// Return the most recently consumed token, if any.
    fn previous(&self) -> Option<&'a Token> {
        let tokens: &'a [Token] = self.tokens;
        self.pos.checked_sub(1).and_then(|i| tokens.get(i))
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
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

    fn check_ident(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Ident(_))
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the given punctuation or report `expected '<p>'`. Nothing is consumed on mismatch.
    fn expect_punct(&mut self, id: PunctuationId) -> Option<&'a Token> {
        if self.check_punct(id) {
            Some(self.advance())
        } else {
            self.error_at_current(&format!("expected '{}'", punctuation::as_str(id)));
            None
        }
    }

    fn expect_op(&mut self, id: OperatorId) -> Option<&'a Token> {
        if self.check_op(id) {
            Some(self.advance())
        } else {
            self.error_at_current(&format!("expected '{}'", operators::as_str(id)));
            None
        }
    }

    /// Consume an identifier or report `expected identifier`.
    fn expect_ident(&mut self) -> Option<Ident> {
        let token = self.peek();
        match &token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Some(Ident::new(name.clone(), token.span))
            }
            _ => {
                self.error_at_current("expected identifier");
                None
            }
        }
    }

    /// Span from `start` through the most recently consumed token.
    fn span_from(&self, start: Span) -> Span {
        match self.previous() {
            Some(prev) if prev.span.end >= start.start => Span::new(start.start, prev.span.end, start.line),
            _ => start,
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Report a syntax error at the current token (`<msg>, found <token>`) and enter panic mode.
    ///
    /// ## Notes
    /// - Suppressed while already panicking.
    /// - Not reported when the current token is a scanner error token: that input already has a diagnostic.
    fn error_at_current(&mut self, msg: &str) {
        if self.panicking {
            return;
        }
        self.panicking = true;

        let token = self.peek();
        tracing::debug!(line = token.line(), msg, "entering panic mode");
        if matches!(token.kind, TokenKind::Error(_)) {
            return;
        }
        self.errors.push(CompileError::syntax(
            format!("{}, found {}", msg, token.describe()),
            token.span,
        ));
    }

    /// Report `unexpected token '<t>'` at the current token.
    fn unexpected_token(&mut self) {
        if self.panicking {
            return;
        }
        self.panicking = true;

        let token = self.peek();
        tracing::debug!(line = token.line(), "entering panic mode");
        if matches!(token.kind, TokenKind::Error(_)) {
            return;
        }
        let found = match token.kind {
            TokenKind::Eof => "unexpected end of input".to_string(),
            _ => format!("unexpected token {}", token.describe()),
        };
        self.errors.push(CompileError::syntax(found, token.span));
    }

    /// Record a binding error. These are never suppressed by panic mode.
    fn binding_error(&mut self, error: impl std::fmt::Display, span: Span) {
        self.errors.push(CompileError::binding(error.to_string(), span));
    }

    /// Resolve an identifier against the current scope chain, reporting a use before declaration.
    fn resolve(&mut self, ident: &Ident) {
        if self.symbols.lookup(self.scope, &ident.name).is_none() {
            let error = BindingError::UndeclaredUse {
                name: ident.name.clone(),
            };
            self.binding_error(error, ident.span);
        }
    }

    fn symbol_error(&mut self, error: SymbolError, span: Span) {
        self.binding_error(error, span);
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Statement-level recovery: skip until `if`, `while`, `for`, `return`, or `;` is next.
    ///
    /// The panic flag is cleared only when such a token is found; at end of input it stays set so trailing
    /// "expected '}'" noise is not reported.
    fn synchronize(&mut self) {
        let start = self.pos;
        while !self.is_at_end() {
            if self.peek().kind.is_statement_sync_point() || self.check_punct(PunctuationId::Semicolon) {
                self.panicking = false;
                break;
            }
            self.advance();
        }
        tracing::debug!(skipped = self.pos - start, resumed = !self.panicking, "synchronize");
    }

    /// Declaration-level recovery: skip until a `;` was just consumed and `int`, `char` or `void` is next.
    fn synchronize_global(&mut self) {
        let start = self.pos;
        while !self.is_at_end() {
            let after_semicolon = self
                .previous()
                .is_some_and(|t| t.kind.is_punctuation(PunctuationId::Semicolon));
            if after_semicolon && self.peek().decl_type().is_some() {
                self.panicking = false;
                break;
            }
            self.advance();
        }
        tracing::debug!(skipped = self.pos - start, resumed = !self.panicking, "synchronize_global");
    }
}
