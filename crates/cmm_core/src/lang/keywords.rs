//! Reserved words of the cmm language.
//!
//! A stable identifier ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) recording the spelling and the
//! syntactic role of each reserved word.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**: `Int` is an identifier, `int` is a keyword.
//! - `extern` is reserved by the scanner but no declaration form accepts it yet.
//!
//! ## Examples
//! ```rust
//! use cmm_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("return"), Some(KeywordId::Return));
//! assert!(keywords::info_for(KeywordId::Char).starts_declaration());
//! ```

/// Stable identifier for every reserved keyword.
///
/// The declaration order matches [`KEYWORDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Types
    Int,
    Char,
    Void,

    // Control flow
    If,
    Else,
    While,
    For,
    Return,

    // Storage
    Extern,
}

/// Grouping used by the parser to decide what a keyword can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// A type name that begins a declaration (`int`, `char`, `void`).
    Type,
    /// A keyword that begins (or continues) a statement.
    ControlFlow,
    /// A storage-class word.
    Storage,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    /// Whether panic-mode recovery inside a function body may resume before this keyword.
    pub is_sync_point: bool,
}

impl KeywordInfo {
    /// Whether this keyword can begin a top-level or local declaration.
    pub fn starts_declaration(&self) -> bool {
        self.category == KeywordCategory::Type
    }
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::Int, "int", KeywordCategory::Type, false),
    info(KeywordId::Char, "char", KeywordCategory::Type, false),
    info(KeywordId::Void, "void", KeywordCategory::Type, false),
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, true),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, false),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, true),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow, true),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow, true),
    info(KeywordId::Extern, "extern", KeywordCategory::Storage, false),
];

/// Return the metadata entry for a keyword.
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    &KEYWORDS[id as usize]
}

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Resolve a word to a keyword id.
///
/// ## Returns
/// - `Some(KeywordId)` if `word` is reserved, `None` if it is an ordinary identifier.
pub fn from_str(word: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == word).map(|k| k.id)
}

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory, is_sync_point: bool) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        is_sync_point,
    }
}
