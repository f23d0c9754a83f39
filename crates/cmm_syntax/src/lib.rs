//! Syntax frontend for cmm: tokens, scanner, AST, diagnostics.
//!
//! ## Notes
//! - This crate is "syntax-only": it does not resolve names or check call sites. The binder and the analyzer live
//!   in the `cmm` crate because they need the symbol table.
//! - Vocabulary identity (keywords/operators/punctuation/base types) comes from `cmm_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use cmm_syntax::lexer;
//!
//! let stream = lexer::lex("int x;");
//! assert!(!stream.had_error());
//! assert_eq!(stream.tokens.len(), 4); // int, x, ;, Eof
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod token_helpers;
