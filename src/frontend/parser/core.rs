/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` loop.
///
/// ## Notes
/// - This file is `include!`'d into `crate::frontend::parser` to keep all parser methods in a
///   single module while avoiding a single large file.

/// Name-resolution failures detected while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("\"{name}\" used before a declaration")]
    UndeclaredUse { name: String },
}

/// Parser state.
///
/// ## Notes
/// - `scope` is the innermost scope identifiers resolve against: [`GLOBAL`] at top level, the function's own scope
///   inside a body.
/// - While `panicking` is set, syntax diagnostics are suppressed. Binding diagnostics are always reported.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<CompileError>,
    symbols: SymbolTable,
    scope: ScopeId,
    panicking: bool,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `cmm_syntax::lexer`, ending with `Eof`. An empty slice parses as an empty
    ///   program.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            symbols: SymbolTable::new(),
            scope: GLOBAL,
            panicking: false,
        }
    }

    /// Seed the diagnostics with errors reported before parsing (the scanner's).
    pub fn with_errors(mut self, errors: Vec<CompileError>) -> Self {
        self.errors = errors;
        self
    }

    /// Parse the entire token stream.
    ///
    /// ## Errors
    /// Returns every accumulated [`CompileError`] if anything went wrong. The parser keeps going after an error so
    /// that one pass reports as much as possible; the partial tree is dropped.
    pub fn parse(mut self) -> Result<ParsedUnit, Vec<CompileError>> {
        let mut declarations = Vec::new();

        // `peek` needs at least one token to clamp to.
        while !self.tokens.is_empty() && !self.is_at_end() {
            if self.panicking {
                self.synchronize_global();
                if self.is_at_end() {
                    break;
                }
            }
            self.declaration(&mut declarations);
        }

        if self.errors.is_empty() {
            Ok(ParsedUnit {
                program: Program { declarations },
                symbols: self.symbols,
            })
        } else {
            Err(self.errors)
        }
    }
}
