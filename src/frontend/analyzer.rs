//! Call-site analysis for cmm
//!
//! Runs after a successful parse. Every call expression and call statement is checked against the callee's
//! recorded signature:
//! - the callee must be a function, not a variable
//! - the argument count must equal the parameter count
//! - each bare-identifier argument must have the parameter's array-ness and base type
//!
//! Each call site is checked independently: the first problem at a site is reported and analysis moves on to the
//! next site. Arguments that are not bare identifiers are not type-checked.

mod calls;

#[cfg(test)]
mod tests;

use thiserror::Error;

use crate::frontend::ast::{Program, Visitor};
use crate::frontend::diagnostics::CompileError;
use crate::frontend::symbols::{GLOBAL, ScopeId, SymbolTable, VariableInfo};

/// Call-site failures. The `Display` form is the diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("\"{name}\" is not a function")]
    NotAFunction { name: String },

    #[error("wrong number of params for \"{name}\", expected {expected} given {given}")]
    ArityMismatch { name: String, expected: usize, given: usize },

    #[error("parameter mismatch for \"{name}\", expected {expected} given {given}")]
    ParameterMismatch {
        name: String,
        expected: VariableInfo,
        given: VariableInfo,
    },
}

/// Analyzer state: the symbol table built by the parser, the scope of the function being walked, and the
/// diagnostics collected so far.
pub struct CallChecker<'a> {
    symbols: &'a SymbolTable,
    scope: ScopeId,
    errors: Vec<CompileError>,
}

impl<'a> CallChecker<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self {
            symbols,
            scope: GLOBAL,
            errors: Vec::new(),
        }
    }

    /// Check every call site in `program`.
    ///
    /// ## Errors
    /// Returns one [`CompileError`] per failing call site, in traversal order.
    pub fn check_program(mut self, program: &Program) -> Result<(), Vec<CompileError>> {
        self.visit_program(program);
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Validate every call site of a parsed program.
///
/// ## Parameters
/// - `program`: a tree from a parse that reported no errors.
/// - `symbols`: the symbol table produced by the same parse.
///
/// ## Errors
/// Returns the call-site diagnostics if any call is invalid.
#[tracing::instrument(skip_all, fields(declarations = program.declarations.len()))]
pub fn check_calls(program: &Program, symbols: &SymbolTable) -> Result<(), Vec<CompileError>> {
    CallChecker::new(symbols).check_program(program)
}

/// Whether any call site in `program` is invalid.
pub fn has_semantic_errors(program: &Program, symbols: &SymbolTable) -> bool {
    check_calls(program, symbols).is_err()
}
