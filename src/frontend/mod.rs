//! cmm compiler frontend
//!
//! This module contains all frontend components:
//! - `lexer`: tokenization of source code
//! - `ast`: abstract syntax tree definitions
//! - `diagnostics`: compile errors and their rendering
//! - `symbols`: symbol table and scope management
//! - `parser`: parsing tokens into the AST while binding symbols
//! - `analyzer`: call-site validation over a parsed program
//! - `dump`: debug renderings of tokens, AST and symbols

// Syntax components are provided by the shared cmm_syntax crate.
pub use cmm_syntax::{ast, diagnostics, lexer};

// Binding and analysis need the symbol table, so they live here.
pub mod analyzer;
pub mod dump;
pub mod parser;
pub mod symbols;

use crate::frontend::ast::Program;
use crate::frontend::diagnostics::CompileError;
use crate::frontend::symbols::SymbolTable;

/// A program that passed every frontend stage.
#[derive(Debug)]
pub struct CheckedUnit {
    pub program: Program,
    pub symbols: SymbolTable,
}

/// Run the whole frontend over one source file: lex, parse and bind, then check call sites.
///
/// ## Errors
/// Returns every diagnostic found. Lexical and parse-time errors come first, in the order they were found; call
/// sites are only checked once parsing succeeded.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn check_source(source: &str) -> Result<CheckedUnit, Vec<CompileError>> {
    let tokens = lexer::lex(source);
    let unit = parser::parse(&tokens)?;
    analyzer::check_calls(&unit.program, &unit.symbols)?;
    Ok(CheckedUnit {
        program: unit.program,
        symbols: unit.symbols,
    })
}
