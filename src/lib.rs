#![forbid(unsafe_code)]
//! cmm compiler frontend
//!
//! cmm is a small C-like language: `int`/`char`/`void` functions, global and local scalars and arrays, `if`,
//! `while`, `for` and `return`. This crate turns cmm source into a validated AST and symbol table, or into a list
//! of diagnostics: scanner, single-pass parser with inline symbol binding and panic-mode recovery, and a call-site
//! analyzer. There is no code generation.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Examples
//!
//! ```rust
//! let unit = cmm::check_source("int f(int a){return a;} int main(void){return f(1);}").unwrap();
//! assert_eq!(unit.program.declarations.len(), 2);
//!
//! let errors = cmm::check_source("int main(void){return x;}").unwrap_err();
//! assert_eq!(cmm::diagnostics::format_error(&errors[0]), "Line: 1: error: \"x\" used before a declaration");
//! ```

pub mod cli;
pub mod frontend;

pub use frontend::analyzer;
pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::dump;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::symbols;

pub use frontend::{CheckedUnit, check_source};
