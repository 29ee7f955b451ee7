use std::{cell::RefCell, collections::HashMap, fmt::Display, rc::Rc};

use log::{trace, warn};

use crate::ast::types::{FnType, Type};

use super::value::Value;

pub type SymbolRef = Rc<RefCell<Symbol>>;
pub type ScopeRef = Rc<RefCell<Scope>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Var,
    Fn,
}

/// The resolved identity of a declared name and its current runtime value.
#[derive(Debug)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub kind: SymbolKind,
    pub value: Value,
}

impl Symbol {
    pub fn new_var(name: String, ty: Type) -> SymbolRef {
        let value = Value::default_for(&ty);
        Rc::new(RefCell::new(Symbol {
            name,
            ty,
            kind: SymbolKind::Var,
            value,
        }))
    }

    pub fn new_fn(name: String, ty: FnType) -> SymbolRef {
        Rc::new(RefCell::new(Symbol {
            name,
            ty: Type::Fn(ty),
            kind: SymbolKind::Fn,
            value: Value::Unset,
        }))
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            SymbolKind::Fn => write!(f, "{} : {}", self.name, self.ty),
            SymbolKind::Var => write!(f, "{} : {} = {}", self.name, self.ty, self.value),
        }
    }
}

/// A lexical block's name to symbol mapping, linked to its enclosing scope.
#[derive(Debug, Default)]
pub struct Scope {
    symbols: HashMap<String, SymbolRef>,
    parent: Option<ScopeRef>,
}

impl Scope {
    pub fn new(parent: Option<ScopeRef>) -> Self {
        Scope {
            symbols: HashMap::new(),
            parent,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolRef> {
        self.symbols.get(name).map(Rc::clone)
    }

    pub fn clash(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn insert(&mut self, symbol: SymbolRef) -> bool {
        let name = symbol.borrow().name.clone();
        if self.clash(&name) {
            return false;
        }
        self.symbols.insert(name, symbol);
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<SymbolRef> {
        self.symbols.remove(name)
    }

    pub fn parent(&self) -> Option<ScopeRef> {
        self.parent.as_ref().map(Rc::clone)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols sorted by name.
    pub fn symbols(&self) -> Vec<SymbolRef> {
        let mut symbols: Vec<SymbolRef> = self.symbols.values().map(Rc::clone).collect();
        symbols.sort_by(|a, b| a.borrow().name.cmp(&b.borrow().name));
        symbols
    }
}

/// Stack of scopes. The global scope sits at the bottom and is never popped.
#[derive(Debug)]
pub struct SymbolTable {
    global: ScopeRef,
    nested: Vec<ScopeRef>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            global: Rc::new(RefCell::new(Scope::new(None))),
            nested: vec![],
        }
    }

    pub fn enter_scope(&mut self) -> ScopeRef {
        let scope = Rc::new(RefCell::new(Scope::new(Some(self.current_scope()))));
        self.nested.push(Rc::clone(&scope));
        trace!("entered scope at depth {}", self.depth());
        scope
    }

    /// Pops the innermost scope. Refuses to pop the global scope.
    pub fn leave_scope(&mut self) -> Option<ScopeRef> {
        let scope = self.nested.pop();
        if scope.is_none() {
            warn!("attempted to leave the global scope");
        } else {
            trace!("left scope, now at depth {}", self.depth());
        }
        scope
    }

    pub fn current_scope(&self) -> ScopeRef {
        Rc::clone(self.nested.last().unwrap_or(&self.global))
    }

    pub fn global_scope(&self) -> ScopeRef {
        Rc::clone(&self.global)
    }

    /// Number of scopes above the global scope.
    pub fn depth(&self) -> usize {
        self.nested.len()
    }

    pub fn is_global(&self) -> bool {
        self.nested.is_empty()
    }

    /// Inserts into the current scope. Fails on a clash in that scope only.
    pub fn insert(&mut self, symbol: SymbolRef) -> bool {
        self.current_scope().borrow_mut().insert(symbol)
    }

    /// Searches outward from the current scope along the parent links.
    pub fn find(&self, name: &str) -> Option<SymbolRef> {
        let mut scope = Some(self.current_scope());

        while let Some(current) = scope {
            if let Some(symbol) = current.borrow().lookup(name) {
                return Some(symbol);
            }
            scope = current.borrow().parent();
        }

        None
    }

    pub fn clash(&self, name: &str) -> bool {
        self.current_scope().borrow().clash(name)
    }

    pub fn remove_global(&mut self, name: &str) -> Option<SymbolRef> {
        self.global.borrow_mut().remove(name)
    }

    /// Releases every scope, leaving a fresh empty global scope.
    pub fn clear(&mut self) {
        self.nested.clear();
        self.global = Rc::new(RefCell::new(Scope::new(None)));
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scopes = std::iter::once(&self.global).chain(self.nested.iter());

        for (depth, scope) in scopes.enumerate() {
            writeln!(f, "scope {}:", depth)?;
            for symbol in scope.borrow().symbols() {
                writeln!(f, "  {}", symbol.borrow())?;
            }
        }

        Ok(())
    }
}
