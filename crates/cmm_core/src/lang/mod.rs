//! cmm language vocabulary registries.
//!
//! Callers work with **stable IDs** (`KeywordId`, `OperatorId`, `PunctuationId`, `BaseTypeId`) and look up spellings
//! and metadata via the const registry tables instead of comparing strings all over the compiler.
//!
//! ## Notes
//! - Each registry table is ordered by its id enum's declaration order, so `info_for` is an index, not a search.
//!   The guardrail tests in `tests/lang_registry_guardrails.rs` keep that true.
//!
//! ## Examples
//! ```rust
//! use cmm_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("while"), Some(KeywordId::While));
//! assert_eq!(keywords::as_str(KeywordId::While), "while");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod types;
