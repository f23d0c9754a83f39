//! Parser and symbol binder for cmm
//!
//! A single-pass recursive-descent parser that builds the AST and populates the [`SymbolTable`] at the same time:
//! every declaration is inserted into its scope as soon as it is parsed, and every identifier read is resolved on
//! the spot. Syntax errors switch the parser into panic mode until the next synchronization point.
//!
//! ## Examples
//!
//! ```rust
//! use cmm::frontend::{lexer, parser};
//!
//! let tokens = lexer::lex("int x; int main(void) { x = 1; return x; }");
//! let unit = parser::parse(&tokens).unwrap();
//! assert_eq!(unit.program.declarations.len(), 2);
//! ```

use thiserror::Error;

use crate::frontend::ast::*;
use crate::frontend::diagnostics::CompileError;
use crate::frontend::lexer::{Token, TokenKind, TokenStream};
use crate::frontend::symbols::{FunctionSlot, GLOBAL, Param, ScopeId, Signature, SymbolError, SymbolTable};
use cmm_core::lang::keywords::KeywordId;
use cmm_core::lang::operators::{self, OperatorId, Precedence};
use cmm_core::lang::punctuation::{self, PunctuationId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
