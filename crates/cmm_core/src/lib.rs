//! Canonical language vocabulary for the cmm compiler.
//!
//! Everything here is pure data plus lookup helpers: the scanner uses it to classify words and symbols, the parser
//! uses it for spellings in "expected ..." diagnostics, and the dump utilities use it to label tokens.
//!
//! ## Notes
//!
//! - **No IO**, no global state, and no AST types. Anything that needs to know about syntax trees belongs in
//!   `cmm_syntax`.

pub mod lang;
