//! Scanner for the cmm language.
//!
//! Handles tokenization including:
//! - Keywords (`int`, `char`, `void`, `if`, `else`, `while`, `for`, `return`, `extern`)
//! - Identifiers, decimal integers, char literals (`'a'`, `'\n'`) and string literals (no escapes, may span lines)
//! - One- and two-character operators and punctuation
//! - `//` line comments
//!
//! Malformed input never stops the scan: it produces a [`TokenKind::Error`] token and a lexical diagnostic, and
//! scanning resumes after the bad text.

pub mod tokens;

pub use tokens::{Token, TokenKind, TokenStream, keyword_id};

use thiserror::Error;

use crate::ast::Span;
use crate::diagnostics::CompileError;
use cmm_core::lang::operators::OperatorId;
use cmm_core::lang::punctuation;

/// Malformed input found while scanning. The `Display` form is the diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string")]
    UnterminatedString,

    #[error("unterminated char literal")]
    UnterminatedChar,

    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("integer literal '{0}' is too large")]
    IntegerTooLarge(String),
}

/// Scanner for cmm source code.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: u32,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new scanner for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The stream always ends with exactly one `Eof` token, even when lexical errors were reported.
    pub fn tokenize(mut self) -> TokenStream {
        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos, self.line),
        ));

        TokenStream {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip blanks, newlines and `//` comments.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;
        let line = self.line;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '+' => self.add_op(OperatorId::Plus, start, line),
            '-' => self.add_op(OperatorId::Minus, start, line),
            '*' => self.add_op(OperatorId::Star, start, line),
            '/' => self.add_op(OperatorId::Slash, start, line),
            '!' => self.operator(start, line, OperatorId::Bang, '=', OperatorId::NotEq),
            '=' => self.operator(start, line, OperatorId::Eq, '=', OperatorId::EqEq),
            '<' => self.operator(start, line, OperatorId::Lt, '=', OperatorId::LtEq),
            '>' => self.operator(start, line, OperatorId::Gt, '=', OperatorId::GtEq),
            '&' => self.doubled(start, line, '&', OperatorId::AndAnd),
            '|' => self.doubled(start, line, '|', OperatorId::OrOr),

            '"' => self.scan_string(start, line),
            '\'' => self.scan_char(start, line),

            '0'..='9' => self.scan_number(start, line),

            _ if is_ident_start(c) => self.scan_identifier(start, line),

            _ => match punctuation::from_char(c) {
                Some(id) => self.add_token(TokenKind::Punctuation(id), start, line),
                None => self.error(LexError::UnexpectedChar(c), start, line),
            },
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: usize, line: u32) {
        self.tokens
            .push(Token::new(kind, Span::new(start, self.current_pos, line)));
    }

    fn add_op(&mut self, id: OperatorId, start: usize, line: u32) {
        self.add_token(TokenKind::Operator(id), start, line);
    }

    /// Emit an error token covering `start..current_pos` and record the diagnostic.
    fn error(&mut self, error: LexError, start: usize, line: u32) {
        let span = Span::new(start, self.current_pos, line);
        let text = self.source[start..self.current_pos].to_string();
        tracing::debug!(line, %error, "lexical error");
        self.errors.push(CompileError::lexical(error.to_string(), span));
        self.tokens.push(Token::new(TokenKind::Error(text), span));
    }

    /// `x` or `x=`.
    fn operator(&mut self, start: usize, line: u32, simple: OperatorId, second: char, compound: OperatorId) {
        if self.match_char(second) {
            self.add_op(compound, start, line);
        } else {
            self.add_op(simple, start, line);
        }
    }

    /// `&&` / `||`; the single character is not an operator in cmm.
    fn doubled(&mut self, start: usize, line: u32, c: char, id: OperatorId) {
        if self.match_char(c) {
            self.add_op(id, start, line);
        } else {
            self.error(LexError::UnexpectedChar(c), start, line);
        }
    }

    // ========================================================================
    // Literal scanning
    // ========================================================================

    fn scan_string(&mut self, start: usize, line: u32) {
        let content_start = self.current_pos;
        loop {
            match self.peek() {
                Some('"') => break,
                Some(_) => {
                    self.advance();
                }
                None => {
                    self.error(LexError::UnterminatedString, start, line);
                    return;
                }
            }
        }
        let text = self.source[content_start..self.current_pos].to_string();
        self.advance();
        self.add_token(TokenKind::String(text), start, line);
    }

    fn scan_char(&mut self, start: usize, line: u32) {
        let content_start = self.current_pos;
        match self.peek() {
            Some('\\') => {
                self.advance();
                match self.peek() {
                    Some(c) if c != '\n' => {
                        self.advance();
                    }
                    _ => return self.error(LexError::UnterminatedChar, start, line),
                }
            }
            Some(c) if c != '\'' && c != '\n' => {
                self.advance();
            }
            _ => return self.error(LexError::UnterminatedChar, start, line),
        }

        let content_end = self.current_pos;
        if !self.match_char('\'') {
            return self.error(LexError::UnterminatedChar, start, line);
        }
        let text = self.source[content_start..content_end].to_string();
        self.add_token(TokenKind::Char(text), start, line);
    }

    fn scan_number(&mut self, start: usize, line: u32) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        let digits = &self.source[start..self.current_pos];
        match digits.parse::<u32>() {
            Ok(value) => self.add_token(TokenKind::Int(value), start, line),
            Err(_) => {
                let error = LexError::IntegerTooLarge(digits.to_string());
                self.error(error, start, line);
            }
        }
    }

    fn scan_identifier(&mut self, start: usize, line: u32) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start, line);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start, line);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to scan a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> TokenStream {
    Lexer::new(source).tokenize()
}
