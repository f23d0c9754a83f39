//! Operator vocabulary.
//!
//! Defines the canonical operator set together with the precedence tier the parser climbs through.
//!
//! ## Notes
//! - cmm has four binary tiers, lowest first: comparison, additive, multiplicative, then the prefix operators.
//!   `||` shares the additive tier and `&&` the multiplicative tier.
//! - `-` is both infix and prefix; the registry records its infix role and the parser handles the prefix form.
//! - `=` is listed for spelling purposes only. Assignment is a statement, never an expression.
//!
//! ## Examples
//! ```rust
//! use cmm_core::lang::operators::{self, OperatorId, Precedence};
//!
//! assert_eq!(operators::from_str("<="), Some(OperatorId::LtEq));
//! assert_eq!(operators::info_for(OperatorId::OrOr).precedence, Precedence::Additive);
//! ```

/// Binding tier of an operator. Higher variants bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// `=` (statement-level only).
    Assignment,
    Comparison,
    Additive,
    Multiplicative,
    Prefix,
}

/// Whether an operator is written between or before its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
}

/// Stable identifier for every operator.
///
/// The declaration order matches [`OPERATORS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,

    // Logical
    Bang,
    AndAnd,
    OrOr,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Assignment
    Eq,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: Precedence,
    pub fixity: Fixity,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OperatorId::Plus, "+", Precedence::Additive, Fixity::Infix),
    op(OperatorId::Minus, "-", Precedence::Additive, Fixity::Infix),
    op(OperatorId::Star, "*", Precedence::Multiplicative, Fixity::Infix),
    op(OperatorId::Slash, "/", Precedence::Multiplicative, Fixity::Infix),
    op(OperatorId::Bang, "!", Precedence::Prefix, Fixity::Prefix),
    op(OperatorId::AndAnd, "&&", Precedence::Multiplicative, Fixity::Infix),
    op(OperatorId::OrOr, "||", Precedence::Additive, Fixity::Infix),
    op(OperatorId::EqEq, "==", Precedence::Comparison, Fixity::Infix),
    op(OperatorId::NotEq, "!=", Precedence::Comparison, Fixity::Infix),
    op(OperatorId::Lt, "<", Precedence::Comparison, Fixity::Infix),
    op(OperatorId::LtEq, "<=", Precedence::Comparison, Fixity::Infix),
    op(OperatorId::Gt, ">", Precedence::Comparison, Fixity::Infix),
    op(OperatorId::GtEq, ">=", Precedence::Comparison, Fixity::Infix),
    op(OperatorId::Eq, "=", Precedence::Assignment, Fixity::Infix),
];

/// Return the metadata entry for an operator.
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    &OPERATORS[id as usize]
}

/// Return the spelling of an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Return every infix operator id at the given tier, in registry order.
pub fn at_precedence(precedence: Precedence) -> impl Iterator<Item = OperatorId> {
    OPERATORS
        .iter()
        .filter(move |o| o.precedence == precedence && o.fixity == Fixity::Infix)
        .map(|o| o.id)
}

const fn op(id: OperatorId, spelling: &'static str, precedence: Precedence, fixity: Fixity) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        fixity,
    }
}
