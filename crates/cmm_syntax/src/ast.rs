//! Abstract Syntax Tree definitions for cmm.
//!
//! The tree is built once by the parser and then only read. Children are owned by their parent; identifiers are
//! plain names and are resolved against the symbol table by name + scope, never by pointer.

use std::fmt;

use cmm_core::lang::operators::{self, OperatorId};

pub use cmm_core::lang::types::BaseTypeId as DeclType;

/// Source location: byte offsets plus the 1-based line of the first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32) -> Self {
        Self { start, end, line }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line.min(other.line),
        }
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    /// Line of the token that introduced this node.
    pub fn line(&self) -> u32 {
        self.span.line
    }
}

/// A name as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    pub fn line(&self) -> u32 {
        self.span.line
    }
}

/// A translation unit: the root of the tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub declarations: Vec<Spanned<Declaration>>,
}

/// Top-level declarations
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Variable(VarDecl),
    Function(FunctionDecl),
}

// ============================================================================
// Declarations
// ============================================================================

/// `int x;`, `char buf[16];`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: DeclType,
    pub name: Ident,
    pub is_array: bool,
    /// Declared element count for arrays.
    pub size: Option<u32>,
}

/// One entry of a function's parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub ty: DeclType,
    pub name: Ident,
    pub is_array: bool,
}

/// A function prototype (`body == None`) or definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub return_type: DeclType,
    pub name: Ident,
    pub params: Vec<ParamDecl>,
    pub body: Option<Vec<Spanned<Statement>>>,
}

impl FunctionDecl {
    pub fn is_definition(&self) -> bool {
        self.body.is_some()
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Local variable declaration at the top of a function body.
    VarDecl(VarDecl),
    Assign(Assign),
    Call(Call),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(Option<Spanned<Expr>>),
}

/// `target = value`. The target is always an identifier or an array element.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub target: Spanned<Expr>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_body: Vec<Spanned<Statement>>,
    pub else_body: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Vec<Spanned<Statement>>,
}

/// `for (init; cond; incr) body`; each header clause may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<Spanned<Assign>>,
    pub condition: Option<Spanned<Expr>>,
    pub increment: Option<Spanned<Assign>>,
    pub body: Vec<Spanned<Statement>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(u32),
    Char(String),
    String(String),
    Ident(String),
    Unary(UnaryOp, Box<Spanned<Expr>>),
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
    Index(Ident, Box<Spanned<Expr>>),
    Call(Call),
}

/// `callee(arg, ...)`, used both as an expression and as a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Ident,
    pub args: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    /// Map an infix operator token to its AST operator. `=` and `!` have no binary form.
    pub fn from_operator(id: OperatorId) -> Option<Self> {
        Some(match id {
            OperatorId::Plus => BinaryOp::Add,
            OperatorId::Minus => BinaryOp::Sub,
            OperatorId::Star => BinaryOp::Mul,
            OperatorId::Slash => BinaryOp::Div,
            OperatorId::AndAnd => BinaryOp::And,
            OperatorId::OrOr => BinaryOp::Or,
            OperatorId::EqEq => BinaryOp::Eq,
            OperatorId::NotEq => BinaryOp::NotEq,
            OperatorId::Lt => BinaryOp::Lt,
            OperatorId::LtEq => BinaryOp::LtEq,
            OperatorId::Gt => BinaryOp::Gt,
            OperatorId::GtEq => BinaryOp::GtEq,
            OperatorId::Bang | OperatorId::Eq => return None,
        })
    }

    pub fn operator_id(self) -> OperatorId {
        match self {
            BinaryOp::Add => OperatorId::Plus,
            BinaryOp::Sub => OperatorId::Minus,
            BinaryOp::Mul => OperatorId::Star,
            BinaryOp::Div => OperatorId::Slash,
            BinaryOp::And => OperatorId::AndAnd,
            BinaryOp::Or => OperatorId::OrOr,
            BinaryOp::Eq => OperatorId::EqEq,
            BinaryOp::NotEq => OperatorId::NotEq,
            BinaryOp::Lt => OperatorId::Lt,
            BinaryOp::LtEq => OperatorId::LtEq,
            BinaryOp::Gt => OperatorId::Gt,
            BinaryOp::GtEq => OperatorId::GtEq,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(operators::as_str(self.operator_id()))
    }
}

// ============================================================================
// Visitor trait for AST traversal
// ============================================================================

/// Read-only traversal over a [`Program`].
///
/// Every method defaults to walking its children, so an implementor overrides only the nodes it cares about and
/// calls the matching `walk_*` function to keep descending.
pub trait Visitor {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_declaration(&mut self, decl: &Spanned<Declaration>) {
        match &decl.node {
            Declaration::Variable(v) => self.visit_var_decl(v),
            Declaration::Function(f) => self.visit_function(f),
        }
    }

    fn visit_var_decl(&mut self, _var: &VarDecl) {}

    fn visit_function(&mut self, func: &FunctionDecl) {
        walk_function(self, func);
    }

    fn visit_statement(&mut self, stmt: &Spanned<Statement>) {
        walk_statement(self, stmt);
    }

    fn visit_assign(&mut self, assign: &Assign) {
        walk_assign(self, assign);
    }

    fn visit_expr(&mut self, expr: &Spanned<Expr>) {
        walk_expr(self, expr);
    }

    /// Called for calls in both expression and statement position. `line` is the line of the call.
    fn visit_call(&mut self, call: &Call, _line: u32) {
        walk_call(self, call);
    }
}

pub fn walk_program<V: Visitor + ?Sized>(v: &mut V, program: &Program) {
    for decl in &program.declarations {
        v.visit_declaration(decl);
    }
}

pub fn walk_function<V: Visitor + ?Sized>(v: &mut V, func: &FunctionDecl) {
    for stmt in func.body.iter().flatten() {
        v.visit_statement(stmt);
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(v: &mut V, stmt: &Spanned<Statement>) {
    match &stmt.node {
        Statement::VarDecl(var) => v.visit_var_decl(var),
        Statement::Assign(assign) => v.visit_assign(assign),
        Statement::Call(call) => v.visit_call(call, stmt.line()),
        Statement::If(if_stmt) => {
            v.visit_expr(&if_stmt.condition);
            for s in if_stmt.then_body.iter().chain(&if_stmt.else_body) {
                v.visit_statement(s);
            }
        }
        Statement::While(while_stmt) => {
            v.visit_expr(&while_stmt.condition);
            for s in &while_stmt.body {
                v.visit_statement(s);
            }
        }
        Statement::For(for_stmt) => {
            if let Some(init) = &for_stmt.init {
                v.visit_assign(&init.node);
            }
            if let Some(cond) = &for_stmt.condition {
                v.visit_expr(cond);
            }
            if let Some(incr) = &for_stmt.increment {
                v.visit_assign(&incr.node);
            }
            for s in &for_stmt.body {
                v.visit_statement(s);
            }
        }
        Statement::Return(value) => {
            if let Some(expr) = value {
                v.visit_expr(expr);
            }
        }
    }
}

pub fn walk_assign<V: Visitor + ?Sized>(v: &mut V, assign: &Assign) {
    v.visit_expr(&assign.target);
    v.visit_expr(&assign.value);
}

pub fn walk_expr<V: Visitor + ?Sized>(v: &mut V, expr: &Spanned<Expr>) {
    match &expr.node {
        Expr::Int(_) | Expr::Char(_) | Expr::String(_) | Expr::Ident(_) => {}
        Expr::Unary(_, operand) => v.visit_expr(operand),
        Expr::Binary(left, _, right) => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        Expr::Index(_, index) => v.visit_expr(index),
        Expr::Call(call) => v.visit_call(call, expr.line()),
    }
}

pub fn walk_call<V: Visitor + ?Sized>(v: &mut V, call: &Call) {
    for arg in &call.args {
        v.visit_expr(arg);
    }
}
