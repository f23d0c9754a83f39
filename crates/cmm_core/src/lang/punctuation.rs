//! Punctuation vocabulary: delimiters and separators.
//!
//! ## Examples
//! ```rust
//! use cmm_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_char('{'), Some(PunctuationId::LBrace));
//! assert_eq!(punctuation::as_str(PunctuationId::Semicolon), ";");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets, braces and parentheses.
    Delimiter,
    /// `,` and `;`.
    Separator,
}

/// Stable identifier for punctuation tokens.
///
/// The declaration order matches [`PUNCTUATION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: char,
    pub spelling: &'static str,
    pub category: PunctuationCategory,
}

/// Registry of all punctuation.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::LParen, '(', "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ')', ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, '{', "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, '}', "}", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, '[', "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, ']', "]", PunctuationCategory::Delimiter),
    info(PunctuationId::Comma, ',', ",", PunctuationCategory::Separator),
    info(PunctuationId::Semicolon, ';', ";", PunctuationCategory::Separator),
];

pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    &PUNCTUATION[id as usize]
}

pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).spelling
}

pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Resolve a single character to a punctuation id.
pub fn from_char(c: char) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == c).map(|p| p.id)
}

/// Resolve a spelling to a punctuation id.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.spelling == s).map(|p| p.id)
}

const fn info(
    id: PunctuationId,
    canonical: char,
    spelling: &'static str,
    category: PunctuationCategory,
) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        spelling,
        category,
    }
}
