/// Declaration parsing.
///
/// This chunk parses everything that starts with a type keyword:
/// - Global and local variable lists (`int a, b[10];`)
/// - Function prototypes, including comma-separated lists (`int f(int a), g(void);`)
/// - Function definitions, whose bodies are bound in the function's own scope
///
/// Each declaration is bound in the symbol table as soon as its name is known.
impl<'a> Parser<'a> {
    // ========================================================================
    // Top level
    // ========================================================================

    fn declaration(&mut self, out: &mut Vec<Spanned<Declaration>>) {
        let start = self.current_span();
        let Some(ty) = self.peek().decl_type() else {
            self.error_at_current("expected 'int', 'char' or 'void'");
            self.advance();
            return;
        };
        self.advance();

        let names_function = self.check_ident() && self.peek_next().kind.is_punctuation(PunctuationId::LParen);
        if names_function || !is_storable(ty) {
            self.function_declarations(ty, start, out);
        } else if self.check_ident() {
            for decl in self.var_declarations(ty) {
                out.push(Spanned::new(Declaration::Variable(decl.node), decl.span));
            }
        } else {
            self.error_at_current("expected identifier");
        }
    }

    // ========================================================================
    // Variables
    // ========================================================================

    /// Parse `name[, name]* ;` after the type keyword, binding each name in the current scope.
    fn var_declarations(&mut self, ty: DeclType) -> Vec<Spanned<VarDecl>> {
        let mut decls = Vec::new();
        loop {
            let Some(decl) = self.var_declarator(ty) else {
                return decls;
            };
            decls.push(decl);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::Semicolon);
        decls
    }

    /// `name` or `name[N]` / `name[]`.
    fn var_declarator(&mut self, ty: DeclType) -> Option<Spanned<VarDecl>> {
        let name = self.expect_ident()?;
        let mut is_array = false;
        let mut size = None;

        if self.match_punct(PunctuationId::LBracket) {
            is_array = true;
            if let TokenKind::Int(n) = &self.peek().kind {
                size = Some(*n);
                self.advance();
            }
            self.expect_punct(PunctuationId::RBracket)?;
        }

        if let Err(err) = self
            .symbols
            .insert_variable(self.scope, &name.name, ty, is_array, name.line())
        {
            self.symbol_error(err, name.span);
        }

        let span = self.span_from(name.span);
        Some(Spanned::new(
            VarDecl {
                ty,
                name,
                is_array,
                size,
            },
            span,
        ))
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// Parse one function definition or a comma-separated list of prototypes sharing `return_type`.
    fn function_declarations(&mut self, return_type: DeclType, start: Span, out: &mut Vec<Spanned<Declaration>>) {
        let Some(header) = self.function_header(return_type) else {
            return;
        };

        if self.check_punct(PunctuationId::LBrace) {
            let func = self.function_definition(header);
            out.push(Spanned::new(Declaration::Function(func), self.span_from(start)));
            return;
        }

        self.declare_prototype(&header);
        out.push(Spanned::new(Declaration::Function(header), self.span_from(start)));

        if !self.check_punct(PunctuationId::Comma) && !self.check_punct(PunctuationId::Semicolon) {
            self.error_at_current("expected ';' or '{'");
            return;
        }

        while self.match_punct(PunctuationId::Comma) {
            let item_start = self.current_span();
            let Some(next) = self.function_header(return_type) else {
                return;
            };
            self.declare_prototype(&next);
            out.push(Spanned::new(Declaration::Function(next), self.span_from(item_start)));
        }
        self.expect_punct(PunctuationId::Semicolon);
    }

    /// `name ( params )`. Returns `None` (in panic mode) if any part is malformed.
    fn function_header(&mut self, return_type: DeclType) -> Option<FunctionDecl> {
        let name = self.expect_ident()?;
        self.expect_punct(PunctuationId::LParen)?;
        let params = self.parameters()?;
        self.expect_punct(PunctuationId::RParen)?;

        Some(FunctionDecl {
            return_type,
            name,
            params,
            body: None,
        })
    }

    /// `void` (no parameters) or a comma-separated list of `int`/`char` parameters.
    fn parameters(&mut self) -> Option<Vec<ParamDecl>> {
        if self.match_keyword(KeywordId::Void) {
            return Some(Vec::new());
        }

        let mut params = vec![self.parameter("expected 'int', 'char' or 'void'")?];
        while self.match_punct(PunctuationId::Comma) {
            params.push(self.parameter("expected 'int' or 'char'")?);
        }
        Some(params)
    }

    /// `int name`, `char name[]`, ...
    fn parameter(&mut self, expected: &str) -> Option<ParamDecl> {
        let Some(ty) = self.peek().decl_type().filter(|ty| is_storable(*ty)) else {
            self.error_at_current(expected);
            return None;
        };
        self.advance();

        let name = self.expect_ident()?;
        let is_array = if self.match_punct(PunctuationId::LBracket) {
            self.expect_punct(PunctuationId::RBracket)?;
            true
        } else {
            false
        };

        Some(ParamDecl { ty, name, is_array })
    }

    fn declare_prototype(&mut self, header: &FunctionDecl) {
        let result = self.symbols.insert_function_prototype(
            GLOBAL,
            &header.name.name,
            signature_of(header),
            header.name.line(),
        );
        match result {
            Ok(slot) => self.report_duplicate_params(&slot, header),
            Err(err) => self.symbol_error(err, header.name.span),
        }
    }

    /// Bind the definition, then parse `{ locals* statements* }` in the function's scope.
    ///
    /// When the definition is rejected the body is still parsed: against the existing function's scope if the name
    /// is a function (its locals become no-ops once that scope is sealed), otherwise against a detached scope.
    fn function_definition(&mut self, mut header: FunctionDecl) -> FunctionDecl {
        let result = self.symbols.insert_function_definition(
            GLOBAL,
            &header.name.name,
            signature_of(&header),
            header.name.line(),
        );
        let scope = match result {
            Ok(slot) => {
                self.report_duplicate_params(&slot, &header);
                slot.scope
            }
            Err(err) => {
                self.symbol_error(err, header.name.span);
                let existing = self
                    .symbols
                    .lookup_local(GLOBAL, &header.name.name)
                    .and_then(|sym| sym.as_function())
                    .map(|info| info.scope);
                match existing {
                    Some(scope) => scope,
                    None => self.symbols.detached_function_scope(),
                }
            }
        };

        let outer = std::mem::replace(&mut self.scope, scope);
        self.advance();

        let mut body = Vec::new();
        while let Some(ty) = self.peek().decl_type().filter(|ty| is_storable(*ty)) {
            self.advance();
            for decl in self.var_declarations(ty) {
                body.push(Spanned::new(Statement::VarDecl(decl.node), decl.span));
            }
        }

        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            self.statement(&mut body);
        }

        self.symbols.seal(scope);
        self.scope = outer;
        self.expect_punct(PunctuationId::RBrace);

        header.body = Some(body);
        header
    }

    fn report_duplicate_params(&mut self, slot: &FunctionSlot, header: &FunctionDecl) {
        for (idx, err) in &slot.duplicate_params {
            let span = header
                .params
                .get(*idx)
                .map_or(header.name.span, |p| p.name.span);
            self.symbol_error(err.clone(), span);
        }
    }
}

/// The symbol-table signature for a parsed header.
fn signature_of(decl: &FunctionDecl) -> Signature {
    Signature {
        return_type: decl.return_type,
        params: decl
            .params
            .iter()
            .map(|p| Param {
                name: p.name.name.clone(),
                ty: p.ty,
                is_array: p.is_array,
                line: p.name.line(),
            })
            .collect(),
    }
}

/// `int` and `char` may type a variable; `void` may not.
fn is_storable(ty: DeclType) -> bool {
    cmm_core::lang::types::info_for(ty).is_storable
}
