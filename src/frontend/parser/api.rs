/// Parser output: the tree plus the symbol table the binder filled in.
#[derive(Debug)]
pub struct ParsedUnit {
    pub program: Program,
    pub symbols: SymbolTable,
}

/// Parse and bind a token stream.
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `stream`: Scanner output from `cmm_syntax::lexer::lex`. Its lexical errors are carried into the result, so a
///   stream with lexical errors never parses successfully.
///
/// ## Errors
/// Returns `Err(Vec<CompileError>)` with every lexical, syntax, and binding error, in the order they were found.
#[tracing::instrument(skip_all, fields(token_count = stream.tokens.len()))]
pub fn parse(stream: &TokenStream) -> Result<ParsedUnit, Vec<CompileError>> {
    Parser::new(&stream.tokens).with_errors(stream.errors.clone()).parse()
}

/// Parse and report only whether it failed.
///
/// ## Returns
/// - `(Some(unit), false)` on success, `(None, true)` otherwise. The partial tree is never exposed.
pub fn parse_with_flag(stream: &TokenStream) -> (Option<ParsedUnit>, bool) {
    match parse(stream) {
        Ok(unit) => (Some(unit), false),
        Err(_) => (None, true),
    }
}
