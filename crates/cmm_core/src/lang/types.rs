//! Declared base types.
//!
//! cmm only knows three spellings for a type: `int`, `char`, and `void`. Variables and parameters may be `int` or
//! `char` (optionally as arrays); `void` is only legal as a return type or as an empty parameter list.
//!
//! ## Examples
//! ```rust
//! use cmm_core::lang::keywords::KeywordId;
//! use cmm_core::lang::types::{self, BaseTypeId};
//!
//! assert_eq!(types::from_keyword(KeywordId::Char), Some(BaseTypeId::Char));
//! assert!(!types::info_for(BaseTypeId::Void).is_storable);
//! ```

use super::keywords::KeywordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseTypeId {
    Int,
    Char,
    Void,
}

/// Metadata for a base type.
#[derive(Debug, Clone, Copy)]
pub struct BaseTypeInfo {
    pub id: BaseTypeId,
    pub keyword: KeywordId,
    pub canonical: &'static str,
    /// Whether a variable or parameter may have this type.
    pub is_storable: bool,
}

pub const BASE_TYPES: &[BaseTypeInfo] = &[
    BaseTypeInfo {
        id: BaseTypeId::Int,
        keyword: KeywordId::Int,
        canonical: "int",
        is_storable: true,
    },
    BaseTypeInfo {
        id: BaseTypeId::Char,
        keyword: KeywordId::Char,
        canonical: "char",
        is_storable: true,
    },
    BaseTypeInfo {
        id: BaseTypeId::Void,
        keyword: KeywordId::Void,
        canonical: "void",
        is_storable: false,
    },
];

pub fn info_for(id: BaseTypeId) -> &'static BaseTypeInfo {
    &BASE_TYPES[id as usize]
}

pub fn as_str(id: BaseTypeId) -> &'static str {
    info_for(id).canonical
}

/// Map a type keyword to its base type, or `None` for non-type keywords.
pub fn from_keyword(kw: KeywordId) -> Option<BaseTypeId> {
    BASE_TYPES.iter().find(|t| t.keyword == kw).map(|t| t.id)
}

pub fn from_str(s: &str) -> Option<BaseTypeId> {
    BASE_TYPES.iter().find(|t| t.canonical == s).map(|t| t.id)
}

impl std::fmt::Display for BaseTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}
