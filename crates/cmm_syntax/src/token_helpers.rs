//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers reduce repetitive `matches!(...)` at call sites that work with ID-based tokens.

use crate::ast::DeclType;
use crate::lexer::{Token, TokenKind};
use cmm_core::lang::keywords::{self, KeywordId};
use cmm_core::lang::operators::OperatorId;
use cmm_core::lang::punctuation::PunctuationId;
use cmm_core::lang::types;

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return the declared type if this is `int`, `char` or `void`.
    pub fn decl_type(&self) -> Option<DeclType> {
        self.keyword_id().and_then(types::from_keyword)
    }

    /// Return `true` for keywords that panic-mode recovery inside a body may stop before.
    pub fn is_statement_sync_point(&self) -> bool {
        self.keyword_id()
            .is_some_and(|id| keywords::info_for(id).is_sync_point)
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.keyword_id()`.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    /// Convenience wrapper for `self.kind.operator_id()`.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }

    /// Convenience wrapper for `self.kind.decl_type()`.
    pub fn decl_type(&self) -> Option<DeclType> {
        self.kind.decl_type()
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::lex;

    #[test]
    fn test_decl_type_only_for_type_keywords() {
        let stream = lex("int char void if x");
        let tys: Vec<_> = stream.tokens.iter().map(|t| t.decl_type().map(|t| t.to_string())).collect();
        assert_eq!(
            tys,
            vec![
                Some("int".to_string()),
                Some("char".to_string()),
                Some("void".to_string()),
                None,
                None,
                None
            ]
        );
    }

    #[test]
    fn test_statement_sync_points() {
        let stream = lex("if while for return else int");
        let flags: Vec<bool> = stream.tokens.iter().map(|t| t.kind.is_statement_sync_point()).collect();
        assert_eq!(flags, vec![true, true, true, true, false, false, false]);
    }
}
