//! Symbol table and scope management for cmm
//!
//! Scopes live in an arena. The global scope is always [`GLOBAL`]; every function owns exactly one child scope,
//! created the first time the function is declared (prototype or definition) and reused by every later
//! declaration of the same name. Lookups walk from a scope up through its parents.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::frontend::ast::DeclType;

/// Unique identifier for symbols
pub type SymbolId = usize;

/// Index of a scope in the table's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

/// The root scope holding global variables and all functions.
pub const GLOBAL: ScopeId = ScopeId(0);

/// Binding failures. The `Display` form is the diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("previous declaration of \"{name}\" at line {first_line}")]
    Duplicate { name: String, first_line: u32 },

    #[error("previous definition of \"{name}\" at line {first_line}")]
    AlreadyDefined { name: String, first_line: u32 },

    #[error("conflicting with previous declaration of \"{name}\" at line {first_line}")]
    ConflictingDeclaration { name: String, first_line: u32 },
}

/// Symbol table managing all named entities
#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            scopes: vec![Scope::new(None, ScopeKind::Global)],
        }
    }

    /// Create a function scope under the global scope that no function entry owns.
    ///
    /// The parser binds a body here when the function name could not be declared, so the body's own names still
    /// resolve without touching any other function's scope.
    pub fn detached_function_scope(&mut self) -> ScopeId {
        self.push_scope(ScopeKind::Function)
    }

    fn push_scope(&mut self, kind: ScopeKind) -> ScopeId {
        self.scopes.push(Scope::new(Some(GLOBAL), kind));
        let id = ScopeId(self.scopes.len() - 1);
        tracing::debug!(scope = id.0, ?kind, "created scope");
        id
    }

    fn define(&mut self, scope: ScopeId, symbol: Symbol) -> SymbolId {
        let id = self.symbols.len();
        tracing::trace!(name = %symbol.name, scope = scope.0, line = symbol.line, "define symbol");
        self.scopes[scope.0].symbols.insert(symbol.name.clone(), id);
        self.scopes[scope.0].order.push(id);
        self.symbols.push(symbol);
        id
    }

    /// Look up a symbol by name starting at `scope` and walking up its parent chain.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        let mut next = Some(scope);
        while let Some(id) = next {
            let current = self.scopes.get(id.0)?;
            if let Some(&sym) = current.symbols.get(name) {
                return self.symbols.get(sym);
            }
            next = current.parent;
        }
        None
    }

    /// Look up a symbol only in `scope` (no parent lookup)
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        let id = *self.scopes.get(scope.0)?.symbols.get(name)?;
        self.symbols.get(id)
    }

    /// Get a symbol by ID
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Symbols declared directly in `scope`, in declaration order.
    pub fn symbols_in(&self, scope: ScopeId) -> impl Iterator<Item = &Symbol> + '_ {
        self.scopes
            .get(scope.0)
            .into_iter()
            .flat_map(|s| s.order.iter())
            .filter_map(|&id| self.symbols.get(id))
    }

    pub fn scope(&self, scope: ScopeId) -> Option<&Scope> {
        self.scopes.get(scope.0)
    }

    /// Stop `scope` from accepting new variables; later inserts become no-ops.
    pub fn seal(&mut self, scope: ScopeId) {
        if let Some(s) = self.scopes.get_mut(scope.0) {
            s.accepts_new_vars = false;
        }
    }

    /// Declare a variable (or parameter) in `scope`.
    ///
    /// ## Errors
    /// - [`SymbolError::Duplicate`] if `name` is already declared in this exact scope. Names in outer scopes may be
    ///   shadowed.
    ///
    /// ## Notes
    /// - A sealed scope silently ignores the insert and returns `Ok`.
    pub fn insert_variable(
        &mut self,
        scope: ScopeId,
        name: &str,
        ty: DeclType,
        is_array: bool,
        line: u32,
    ) -> Result<(), SymbolError> {
        let Some(target) = self.scopes.get(scope.0) else {
            return Ok(());
        };
        if !target.accepts_new_vars {
            tracing::trace!(name, scope = scope.0, "scope sealed, ignoring variable");
            return Ok(());
        }
        if let Some(prev) = self.lookup_local(scope, name) {
            return Err(SymbolError::Duplicate {
                name: name.to_string(),
                first_line: prev.line,
            });
        }

        self.define(
            scope,
            Symbol {
                name: name.to_string(),
                kind: SymbolKind::Variable(VariableInfo { ty, is_array }),
                line,
                scope,
            },
        );
        Ok(())
    }

    /// Declare a function prototype in `scope`.
    ///
    /// ## Errors
    /// - [`SymbolError::Duplicate`] if `name` is already bound, unless it is a function with the same signature (a
    ///   restated prototype is accepted and returns the existing entry).
    pub fn insert_function_prototype(
        &mut self,
        scope: ScopeId,
        name: &str,
        signature: Signature,
        line: u32,
    ) -> Result<FunctionSlot, SymbolError> {
        match self.lookup_local_id(scope, name) {
            None => Ok(self.create_function(scope, name, signature, line, false)),
            Some(id) => {
                let prev = &self.symbols[id];
                match &prev.kind {
                    SymbolKind::Function(info) if info.signature().matches(&signature) => Ok(FunctionSlot {
                        symbol: id,
                        scope: info.scope,
                        fresh: false,
                        duplicate_params: Vec::new(),
                    }),
                    _ => Err(SymbolError::Duplicate {
                        name: name.to_string(),
                        first_line: prev.line,
                    }),
                }
            }
        }
    }

    /// Declare a function definition in `scope`.
    ///
    /// ## Errors
    /// - [`SymbolError::Duplicate`] if `name` is bound to a variable.
    /// - [`SymbolError::AlreadyDefined`] if the function already has a body.
    /// - [`SymbolError::ConflictingDeclaration`] if an earlier prototype has a different signature (return type,
    ///   parameter count, or any parameter's name, base type, or array-ness).
    ///
    /// ## Notes
    /// - On success against an earlier prototype the entry becomes defined and its line moves to `line`.
    pub fn insert_function_definition(
        &mut self,
        scope: ScopeId,
        name: &str,
        signature: Signature,
        line: u32,
    ) -> Result<FunctionSlot, SymbolError> {
        let Some(id) = self.lookup_local_id(scope, name) else {
            return Ok(self.create_function(scope, name, signature, line, true));
        };

        let prev = &mut self.symbols[id];
        let first_line = prev.line;
        let SymbolKind::Function(info) = &mut prev.kind else {
            return Err(SymbolError::Duplicate {
                name: name.to_string(),
                first_line,
            });
        };

        if info.defined {
            return Err(SymbolError::AlreadyDefined {
                name: name.to_string(),
                first_line,
            });
        }
        if !info.signature().matches(&signature) {
            return Err(SymbolError::ConflictingDeclaration {
                name: name.to_string(),
                first_line,
            });
        }

        info.defined = true;
        let fn_scope = info.scope;
        prev.line = line;
        Ok(FunctionSlot {
            symbol: id,
            scope: fn_scope,
            fresh: false,
            duplicate_params: Vec::new(),
        })
    }

    fn lookup_local_id(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scopes.get(scope.0)?.symbols.get(name).copied()
    }

    fn create_function(
        &mut self,
        scope: ScopeId,
        name: &str,
        signature: Signature,
        line: u32,
        defined: bool,
    ) -> FunctionSlot {
        let fn_scope = self.push_scope(ScopeKind::Function);
        let mut duplicate_params = Vec::new();
        for (idx, param) in signature.params.iter().enumerate() {
            if let Err(err) = self.insert_variable(fn_scope, &param.name, param.ty, param.is_array, param.line) {
                duplicate_params.push((idx, err));
            }
        }

        let symbol = self.define(
            scope,
            Symbol {
                name: name.to_string(),
                kind: SymbolKind::Function(FunctionInfo {
                    return_type: signature.return_type,
                    params: signature.params,
                    scope: fn_scope,
                    defined,
                }),
                line,
                scope,
            },
        );

        FunctionSlot {
            symbol,
            scope: fn_scope,
            fresh: true,
            duplicate_params,
        }
    }
}

/// Result of declaring a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSlot {
    pub symbol: SymbolId,
    /// The function's own scope; bodies bind their locals here.
    pub scope: ScopeId,
    /// Whether this declaration created the entry.
    pub fresh: bool,
    /// Parameters (by position) that collided with an earlier parameter of the same declaration.
    pub duplicate_params: Vec<(usize, SymbolError)>,
}

/// A scope containing symbol definitions
#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    pub symbols: HashMap<String, SymbolId>,
    /// Declaration order, for deterministic dumps.
    order: Vec<SymbolId>,
    pub accepts_new_vars: bool,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>, kind: ScopeKind) -> Self {
        Self {
            parent,
            kind,
            symbols: HashMap::new(),
            order: Vec::new(),
            accepts_new_vars: true,
        }
    }
}

/// Kind of scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Function,
}

/// A symbol in the symbol table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Line of the declaration; for functions, of the most recent accepted definition.
    pub line: u32,
    pub scope: ScopeId,
}

impl Symbol {
    pub fn as_variable(&self) -> Option<&VariableInfo> {
        match &self.kind {
            SymbolKind::Variable(v) => Some(v),
            SymbolKind::Function(_) => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionInfo> {
        match &self.kind {
            SymbolKind::Function(f) => Some(f),
            SymbolKind::Variable(_) => None,
        }
    }
}

/// Kind of symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Variable(VariableInfo),
    Function(FunctionInfo),
}

/// Variable information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableInfo {
    pub ty: DeclType,
    pub is_array: bool,
}

/// Shape of a variable as shown in diagnostics: `int`, `int[]`, `char`, `char[]`.
impl fmt::Display for VariableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.ty, if self.is_array { "[]" } else { "" })
    }
}

/// Function information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub return_type: DeclType,
    pub params: Vec<Param>,
    pub scope: ScopeId,
    pub defined: bool,
}

impl FunctionInfo {
    pub fn signature(&self) -> SignatureRef<'_> {
        SignatureRef {
            return_type: self.return_type,
            params: &self.params,
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: DeclType,
    pub is_array: bool,
    pub line: u32,
}

impl Param {
    pub fn shape(&self) -> VariableInfo {
        VariableInfo {
            ty: self.ty,
            is_array: self.is_array,
        }
    }
}

/// A function's declared return type and parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub return_type: DeclType,
    pub params: Vec<Param>,
}

/// Borrowed view of a stored signature.
#[derive(Debug, Clone, Copy)]
pub struct SignatureRef<'a> {
    pub return_type: DeclType,
    pub params: &'a [Param],
}

impl SignatureRef<'_> {
    /// Structural equality: same return type, same arity, and per position the same name, base type and array-ness.
    /// Declaration lines are ignored.
    pub fn matches(&self, other: &Signature) -> bool {
        self.return_type == other.return_type
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.name == b.name && a.ty == b.ty && a.is_array == b.is_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, ty: DeclType, is_array: bool) -> Param {
        Param {
            name: name.to_string(),
            ty,
            is_array,
            line: 1,
        }
    }

    fn sig(return_type: DeclType, params: Vec<Param>) -> Signature {
        Signature { return_type, params }
    }

    #[test]
    fn test_lookup_walks_to_global() {
        let mut table = SymbolTable::new();
        table.insert_variable(GLOBAL, "g", DeclType::Int, false, 1).unwrap();
        let slot = table
            .insert_function_definition(GLOBAL, "f", sig(DeclType::Void, vec![]), 2)
            .unwrap();
        table.insert_variable(slot.scope, "local", DeclType::Char, true, 3).unwrap();

        assert_eq!(table.lookup(slot.scope, "g").map(|s| s.line), Some(1));
        assert_eq!(table.lookup(slot.scope, "local").map(|s| s.line), Some(3));
        assert!(table.lookup(GLOBAL, "local").is_none());
        assert!(table.lookup(slot.scope, "missing").is_none());
    }

    #[test]
    fn test_function_scopes_hang_off_global() {
        let mut table = SymbolTable::new();
        let slot = table
            .insert_function_prototype(GLOBAL, "f", sig(DeclType::Int, vec![param("a", DeclType::Int, false)]), 1)
            .unwrap();
        let detached = table.detached_function_scope();

        assert_eq!(table.scope(GLOBAL).and_then(|s| s.parent), None);
        for id in [slot.scope, detached] {
            let scope = table.scope(id).unwrap();
            assert_eq!(scope.parent, Some(GLOBAL));
            assert_eq!(scope.kind, ScopeKind::Function);
        }
        assert_ne!(slot.scope, detached);
        assert_eq!(table.lookup(slot.scope, "a").map(|s| s.line), Some(1));
    }

    #[test]
    fn test_shadowing_is_allowed_duplicates_are_not() {
        let mut table = SymbolTable::new();
        table.insert_variable(GLOBAL, "x", DeclType::Int, false, 1).unwrap();
        let slot = table
            .insert_function_definition(GLOBAL, "f", sig(DeclType::Int, vec![]), 2)
            .unwrap();

        table.insert_variable(slot.scope, "x", DeclType::Char, false, 3).unwrap();
        let err = table.insert_variable(slot.scope, "x", DeclType::Int, false, 4).unwrap_err();
        assert_eq!(err.to_string(), "previous declaration of \"x\" at line 3");

        let local = table.lookup(slot.scope, "x").and_then(Symbol::as_variable).copied();
        assert_eq!(
            local,
            Some(VariableInfo {
                ty: DeclType::Char,
                is_array: false
            })
        );
    }

    #[test]
    fn test_sealed_scope_ignores_inserts() {
        let mut table = SymbolTable::new();
        let slot = table
            .insert_function_definition(GLOBAL, "f", sig(DeclType::Int, vec![]), 1)
            .unwrap();
        table.seal(slot.scope);

        assert_eq!(table.insert_variable(slot.scope, "late", DeclType::Int, false, 5), Ok(()));
        assert!(table.lookup_local(slot.scope, "late").is_none());
    }

    #[test]
    fn test_prototype_restatement_is_idempotent() {
        let mut table = SymbolTable::new();
        let s = sig(DeclType::Int, vec![param("a", DeclType::Int, false)]);
        let first = table.insert_function_prototype(GLOBAL, "f", s.clone(), 1).unwrap();
        let second = table.insert_function_prototype(GLOBAL, "f", s, 2).unwrap();

        assert!(first.fresh);
        assert!(!second.fresh);
        assert_eq!(first.scope, second.scope);
        assert_eq!(table.symbols_in(GLOBAL).count(), 1);
    }

    #[test]
    fn test_prototype_conflict_is_duplicate() {
        let mut table = SymbolTable::new();
        table
            .insert_function_prototype(GLOBAL, "f", sig(DeclType::Int, vec![]), 1)
            .unwrap();
        let err = table
            .insert_function_prototype(GLOBAL, "f", sig(DeclType::Char, vec![]), 2)
            .unwrap_err();
        assert_eq!(
            err,
            SymbolError::Duplicate {
                name: "f".to_string(),
                first_line: 1
            }
        );
    }

    #[test]
    fn test_definition_after_matching_prototype() {
        let mut table = SymbolTable::new();
        let s = sig(DeclType::Int, vec![param("a", DeclType::Int, true)]);
        let proto = table.insert_function_prototype(GLOBAL, "f", s.clone(), 1).unwrap();
        let def = table.insert_function_definition(GLOBAL, "f", s, 4).unwrap();

        assert_eq!(proto.scope, def.scope);
        let f = table.lookup(GLOBAL, "f").unwrap();
        assert_eq!(f.line, 4);
        assert!(f.as_function().unwrap().defined);
        assert!(table.lookup_local(def.scope, "a").is_some());
    }

    #[test]
    fn test_definition_conflicts_with_prototype() {
        let cases = [
            sig(DeclType::Char, vec![param("a", DeclType::Int, false)]),
            sig(DeclType::Int, vec![]),
            sig(DeclType::Int, vec![param("b", DeclType::Int, false)]),
            sig(DeclType::Int, vec![param("a", DeclType::Char, false)]),
            sig(DeclType::Int, vec![param("a", DeclType::Int, true)]),
        ];
        for conflicting in cases {
            let mut table = SymbolTable::new();
            table
                .insert_function_prototype(GLOBAL, "f", sig(DeclType::Int, vec![param("a", DeclType::Int, false)]), 1)
                .unwrap();
            let err = table.insert_function_definition(GLOBAL, "f", conflicting, 2).unwrap_err();
            assert_eq!(err.to_string(), "conflicting with previous declaration of \"f\" at line 1");
            assert!(!table.lookup(GLOBAL, "f").unwrap().as_function().unwrap().defined);
        }
    }

    #[test]
    fn test_redefinition_reports_previous_definition() {
        let mut table = SymbolTable::new();
        table
            .insert_function_definition(GLOBAL, "h", sig(DeclType::Int, vec![]), 1)
            .unwrap();
        let err = table
            .insert_function_definition(GLOBAL, "h", sig(DeclType::Int, vec![]), 1)
            .unwrap_err();
        assert_eq!(err.to_string(), "previous definition of \"h\" at line 1");
    }

    #[test]
    fn test_function_over_variable_is_duplicate() {
        let mut table = SymbolTable::new();
        table.insert_variable(GLOBAL, "x", DeclType::Int, false, 1).unwrap();
        let err = table
            .insert_function_definition(GLOBAL, "x", sig(DeclType::Int, vec![]), 2)
            .unwrap_err();
        assert!(matches!(err, SymbolError::Duplicate { first_line: 1, .. }));
    }

    #[test]
    fn test_duplicate_parameters_are_reported() {
        let mut table = SymbolTable::new();
        let s = sig(
            DeclType::Void,
            vec![param("a", DeclType::Int, false), param("a", DeclType::Char, false)],
        );
        let slot = table.insert_function_prototype(GLOBAL, "f", s, 1).unwrap();
        assert_eq!(slot.duplicate_params.len(), 1);
        assert_eq!(slot.duplicate_params[0].0, 1);
        assert_eq!(table.lookup(GLOBAL, "f").unwrap().as_function().unwrap().params.len(), 2);
    }

    #[test]
    fn test_variable_shape_display() {
        let shapes = [
            (DeclType::Int, false, "int"),
            (DeclType::Int, true, "int[]"),
            (DeclType::Char, false, "char"),
            (DeclType::Char, true, "char[]"),
        ];
        for (ty, is_array, expected) in shapes {
            assert_eq!(VariableInfo { ty, is_array }.to_string(), expected);
        }
    }
}
