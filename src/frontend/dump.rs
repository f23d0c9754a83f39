//! Debug dumps: token stream, AST, and symbol table
//!
//! Each dump renders to a `String`; the CLI prints them to stdout for `--tokens`, `--ast` and `--symbols`.

use crate::frontend::ast::*;
use crate::frontend::lexer::TokenStream;
use crate::frontend::symbols::{GLOBAL, ScopeId, SymbolKind, SymbolTable};

/// Spaces added per AST nesting level.
const AST_INDENT: usize = 2;
/// Spaces added per nested function scope in the symbol dump.
const SCOPE_INDENT: usize = 4;

/// Line-oriented output buffer with indentation tracking.
struct TreeWriter {
    output: String,
    indent: usize,
    step: usize,
}

impl TreeWriter {
    fn new(step: usize) -> Self {
        Self {
            output: String::new(),
            indent: 0,
            step,
        }
    }

    fn finish(self) -> String {
        self.output
    }

    fn indent(&mut self) {
        self.indent += self.step;
    }

    fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(self.step);
    }

    /// `Line: <n> -> <indent><text>`
    fn node(&mut self, line: u32, text: &str) {
        self.output
            .push_str(&format!("Line: {} -> {:indent$}{}\n", line, "", text, indent = self.indent));
    }

    /// `<indent><text>`
    fn row(&mut self, text: &str) {
        self.output.push_str(&format!("{:indent$}{}\n", "", text, indent = self.indent));
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// One line per token: `Line: <n> -> [KIND]` padded to 20 columns, two spaces, then the lexeme as written.
pub fn tokens(stream: &TokenStream) -> String {
    let mut out = TreeWriter::new(0);
    for token in &stream.tokens {
        let class = format!("[{}]", token.kind.class_name());
        out.node(token.line(), format!("{class:<20}  {}", token.kind).trim_end());
    }
    out.finish()
}

// ============================================================================
// AST
// ============================================================================

/// One line per node, `Line: <n> -> <indent><field>: (<kind>) ...`. Empty lists are omitted.
pub fn ast(program: &Program) -> String {
    let mut dumper = AstDumper {
        out: TreeWriter::new(AST_INDENT),
    };
    dumper.out.indent();
    if let Some(first) = program.declarations.first() {
        dumper.out.node(first.line(), "stmts: (stmtslist)");
        dumper.out.indent();
        for decl in &program.declarations {
            dumper.declaration(decl);
        }
    }
    dumper.out.finish()
}

struct AstDumper {
    out: TreeWriter,
}

impl AstDumper {
    /// Print `text` at `line`, then the children one level deeper.
    fn nested(&mut self, line: u32, text: &str, children: impl FnOnce(&mut Self)) {
        self.out.node(line, text);
        self.out.indent();
        children(self);
        self.out.dedent();
    }

    fn declaration(&mut self, decl: &Spanned<Declaration>) {
        match &decl.node {
            Declaration::Variable(var) => self.var_decl("stmt", var, decl.line()),
            Declaration::Function(func) => self.function(func, decl.line()),
        }
    }

    fn var_decl(&mut self, field: &str, var: &VarDecl, line: u32) {
        let suffix = match (var.is_array, var.size) {
            (true, Some(n)) => format!(" [{n}]"),
            (true, None) => " []".to_string(),
            (false, _) => String::new(),
        };
        self.nested(line, &format!("{field}: (vardecl) type: {}{suffix}", var.ty), |d| {
            d.ident("ident", &var.name);
        });
    }

    fn function(&mut self, func: &FunctionDecl, line: u32) {
        self.nested(line, &format!("stmt: (funcdecl) type: {}", func.return_type), |d| {
            d.ident("ident", &func.name);
            if !func.params.is_empty() {
                d.nested(func.name.line(), "params: (paramdecl_list)", |d| {
                    for param in &func.params {
                        let array = if param.is_array { " []" } else { "" };
                        d.nested(param.name.line(), &format!("param: (paramdecl) type: {}{array}", param.ty), |d| {
                            d.ident("ident", &param.name);
                        });
                    }
                });
            }
            if let Some(body) = &func.body {
                d.statements("stmts", body);
            }
        });
    }

    fn statements(&mut self, field: &str, stmts: &[Spanned<Statement>]) {
        let Some(first) = stmts.first() else {
            return;
        };
        self.nested(first.line(), &format!("{field}: (stmtslist)"), |d| {
            for stmt in stmts {
                d.statement(stmt);
            }
        });
    }

    fn statement(&mut self, stmt: &Spanned<Statement>) {
        let line = stmt.line();
        match &stmt.node {
            Statement::VarDecl(var) => self.var_decl("stmt", var, line),
            Statement::Assign(assign) => self.assign("stmt", assign, line),
            Statement::Call(call) => self.call("stmt", call, line),
            Statement::If(if_stmt) => self.nested(line, "stmt: (if)", |d| {
                d.expr("cond", &if_stmt.condition);
                d.statements("_if", &if_stmt.then_body);
                d.statements("_else", &if_stmt.else_body);
            }),
            Statement::While(while_stmt) => self.nested(line, "stmt: (while)", |d| {
                d.expr("cond", &while_stmt.condition);
                d.statements("stmts", &while_stmt.body);
            }),
            Statement::For(for_stmt) => self.nested(line, "stmt: (for)", |d| {
                if let Some(init) = &for_stmt.init {
                    d.assign("init", &init.node, init.line());
                }
                if let Some(cond) = &for_stmt.condition {
                    d.expr("cond", cond);
                }
                if let Some(incr) = &for_stmt.increment {
                    d.assign("incr", &incr.node, incr.line());
                }
                d.statements("stmts", &for_stmt.body);
            }),
            Statement::Return(value) => self.nested(line, "stmt: (return)", |d| {
                if let Some(value) = value {
                    d.expr("expr", value);
                }
            }),
        }
    }

    fn assign(&mut self, field: &str, assign: &Assign, line: u32) {
        self.nested(line, &format!("{field}: (assign)"), |d| {
            d.expr("left", &assign.target);
            d.expr("right", &assign.value);
        });
    }

    fn call(&mut self, field: &str, call: &Call, line: u32) {
        self.nested(line, &format!("{field}: (funccall)"), |d| {
            d.ident("ident", &call.callee);
            d.nested(line, "params: (param_list)", |d| {
                for arg in &call.args {
                    d.expr("param", arg);
                }
            });
        });
    }

    fn ident(&mut self, field: &str, ident: &Ident) {
        self.out
            .node(ident.line(), &format!("{field}: (ident) value: '{}'", ident.name));
    }

    fn expr(&mut self, field: &str, expr: &Spanned<Expr>) {
        let line = expr.line();
        match &expr.node {
            Expr::Int(n) => self.out.node(line, &format!("{field}: (int) value: {n}")),
            Expr::Char(c) => self.out.node(line, &format!("{field}: (char) value: '{c}'")),
            Expr::String(s) => self.out.node(line, &format!("{field}: (string) value: \"{s}\"")),
            Expr::Ident(name) => self.out.node(line, &format!("{field}: (ident) value: '{name}'")),
            Expr::Unary(op, operand) => self.nested(line, &format!("{field}: (unaryop) op: {op}"), |d| {
                d.expr("expr", operand);
            }),
            Expr::Binary(left, op, right) => self.nested(line, &format!("{field}: (binop) op: {op}"), |d| {
                d.expr("left", left);
                d.expr("right", right);
            }),
            Expr::Index(name, index) => self.nested(line, &format!("{field}: (arrayaccess)"), |d| {
                d.ident("ident", name);
                d.expr("expr", index);
            }),
            Expr::Call(call) => self.call(field, call, line),
        }
    }
}

// ============================================================================
// Symbols
// ============================================================================

/// The global scope in declaration order; each function is followed by its own scope, nested four spaces deeper.
pub fn symbols(table: &SymbolTable) -> String {
    let mut out = TreeWriter::new(SCOPE_INDENT);
    dump_scope(table, GLOBAL, &mut out);
    out.finish()
}

fn dump_scope(table: &SymbolTable, scope: ScopeId, out: &mut TreeWriter) {
    for sym in table.symbols_in(scope) {
        match &sym.kind {
            SymbolKind::Variable(var) => {
                let array = if var.is_array { "[]" } else { "  " };
                out.row(&format!(
                    "sym type: var  | decl type: {:<4}{array} | sym: {}",
                    var.ty.to_string(),
                    sym.name
                ));
            }
            SymbolKind::Function(func) => {
                out.row(&format!(
                    "sym type: func | decl type: {:<4}   | sym: {:<20} | n_params: {}",
                    func.return_type.to_string(),
                    sym.name,
                    func.params.len()
                ));
                out.indent();
                dump_scope(table, func.scope, out);
                out.dedent();
            }
        }
    }
}
