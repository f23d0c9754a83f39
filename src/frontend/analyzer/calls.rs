//! The call-site walk: scope tracking per function and the three checks at each call.

use crate::frontend::ast::*;
use crate::frontend::diagnostics::CompileError;
use crate::frontend::symbols::{FunctionInfo, GLOBAL, SymbolKind, VariableInfo};

use super::{CallChecker, CallError};

impl Visitor for CallChecker<'_> {
    /// Arguments resolve against the function's own scope, then the global one.
    fn visit_function(&mut self, func: &FunctionDecl) {
        if !func.is_definition() {
            return;
        }
        let Some(info) = self
            .symbols
            .lookup_local(GLOBAL, &func.name.name)
            .and_then(|sym| sym.as_function())
        else {
            return;
        };

        let outer = std::mem::replace(&mut self.scope, info.scope);
        walk_function(self, func);
        self.scope = outer;
    }

    fn visit_call(&mut self, call: &Call, line: u32) {
        if let Err(error) = self.check_call(call) {
            tracing::debug!(line, callee = %call.callee.name, %error, "invalid call site");
            self.errors
                .push(CompileError::semantic(error.to_string(), call.callee.span));
        }
        walk_call(self, call);
    }
}

impl CallChecker<'_> {
    // ========================================================================
    // Call sites
    // ========================================================================

    /// Check one call site and return its first problem.
    ///
    /// A callee that is not bound at all was already reported by the parser and is skipped here.
    fn check_call(&self, call: &Call) -> Result<(), CallError> {
        let name = &call.callee.name;
        let callee = match self.symbols.lookup(GLOBAL, name).map(|sym| &sym.kind) {
            None => return Ok(()),
            Some(SymbolKind::Variable(_)) => return Err(CallError::NotAFunction { name: name.clone() }),
            Some(SymbolKind::Function(info)) => info,
        };

        check_arity(name, callee, call.args.len())?;

        for (param, arg) in callee.params.iter().zip(&call.args) {
            let Some(given) = self.argument_shape(arg) else {
                continue;
            };
            let expected = param.shape();
            if expected.is_array != given.is_array || expected.ty != given.ty {
                return Err(CallError::ParameterMismatch {
                    name: name.clone(),
                    expected,
                    given,
                });
            }
        }
        Ok(())
    }

    /// Shape of a bare-identifier argument bound to a variable; `None` for anything else.
    fn argument_shape(&self, arg: &Spanned<Expr>) -> Option<VariableInfo> {
        let Expr::Ident(name) = &arg.node else {
            return None;
        };
        self.symbols.lookup(self.scope, name)?.as_variable().copied()
    }
}

fn check_arity(name: &str, callee: &FunctionInfo, given: usize) -> Result<(), CallError> {
    let expected = callee.params.len();
    if expected == given {
        Ok(())
    } else {
        Err(CallError::ArityMismatch {
            name: name.to_string(),
            expected,
            given,
        })
    }
}
