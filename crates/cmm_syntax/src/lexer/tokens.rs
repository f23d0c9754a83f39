//! Token types for the cmm scanner.
//!
//! Vocabulary tokens carry **registry-backed IDs**:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for punctuation
//!
//! ## Notes
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use std::fmt;

use crate::ast::Span;
use crate::diagnostics::CompileError;
use cmm_core::lang::keywords::{self, KeywordId};
use cmm_core::lang::operators::{self, OperatorId};
use cmm_core::lang::punctuation::{self, PunctuationId};

/// Kind of token produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    Int(u32),
    /// Contents between the quotes, escape kept verbatim (`a`, `\n`).
    Char(String),
    /// Contents between the quotes.
    String(String),

    // ========== Special ==========
    /// Input the scanner could not classify. The matching diagnostic is already in [`TokenStream::errors`].
    Error(String),
    Eof,
}

impl TokenKind {
    /// Upper-case class name used by the token dump.
    pub fn class_name(&self) -> &'static str {
        match self {
            TokenKind::Keyword(_) => "KEYWORD",
            TokenKind::Operator(_) => "OPERATOR",
            TokenKind::Punctuation(_) => "PUNCTUATION",
            TokenKind::Ident(_) => "IDENTIFIER",
            TokenKind::Int(_) => "NUMBER",
            TokenKind::Char(_) => "CHAR",
            TokenKind::String(_) => "STRING",
            TokenKind::Error(_) => "ERROR",
            TokenKind::Eof => "EOF",
        }
    }
}

/// The source spelling of a token (the lexeme).
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(id) => f.write_str(keywords::as_str(*id)),
            TokenKind::Operator(id) => f.write_str(operators::as_str(*id)),
            TokenKind::Punctuation(id) => f.write_str(punctuation::as_str(*id)),
            TokenKind::Ident(name) => f.write_str(name),
            TokenKind::Int(value) => write!(f, "{value}"),
            TokenKind::Char(text) => write!(f, "'{text}'"),
            TokenKind::String(text) => write!(f, "\"{text}\""),
            TokenKind::Error(text) => f.write_str(text),
            TokenKind::Eof => Ok(()),
        }
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn line(&self) -> u32 {
        self.span.line
    }

    /// Describe the token for "found ..." diagnostics: the quoted lexeme, or `end of input`.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.kind),
        }
    }
}

/// Scanner output: the tokens (always ending in exactly one `Eof`) plus any lexical diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
    pub errors: Vec<CompileError>,
}

impl TokenStream {
    /// Whether the scanner hit malformed input.
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
