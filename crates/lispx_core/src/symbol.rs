//! Interned symbols.
//!
//! A symbol is identified by its `(name, namespace)` pair. The table hands
//! out exactly one handle per pair, so symbol equality is pointer equality:
//! - `Namespace` - The four independent identity partitions
//! - `Symbol` - Cheap-to-clone handle compared by identity
//! - `SymbolTable` - The interning table; grows monotonically

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::map::{FastHashMap, fast_map_new};

/// Identity partition of a symbol.
///
/// `x` as a variable, `x` as a function, `x` as a class and `:x` are four
/// unrelated identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    Variable,
    Function,
    Class,
    Keyword,
}

impl Namespace {
    pub const ALL: [Namespace; 4] = [
        Namespace::Variable,
        Namespace::Function,
        Namespace::Class,
        Namespace::Keyword,
    ];

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Variable => "variable",
            Namespace::Function => "function",
            Namespace::Class => "class",
            Namespace::Keyword => "keyword",
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Namespace::Variable => 0,
            Namespace::Function => 1,
            Namespace::Class => 2,
            Namespace::Keyword => 3,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct SymbolData {
    name: Rc<str>,
    namespace: Namespace,
}

/// Handle to an interned symbol.
///
/// Only a `SymbolTable` creates symbols. Two handles are equal iff they came
/// from the same `intern` pair of the same table.
#[derive(Clone)]
pub struct Symbol(Rc<SymbolData>);

impl Symbol {
    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Shared name buffer, for building string values without copying.
    #[inline]
    pub fn name_rc(&self) -> Rc<str> {
        self.0.name.clone()
    }

    #[inline]
    pub fn namespace(&self) -> Namespace {
        self.0.namespace
    }

    #[inline]
    pub fn is_keyword(&self) -> bool {
        self.0.namespace == Namespace::Keyword
    }
}

impl PartialEq for Symbol {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as *const () as usize).hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace() {
            Namespace::Variable => f.write_str(self.name()),
            Namespace::Function => write!(f, "#'{}", self.name()),
            Namespace::Class => write!(f, "#^{}", self.name()),
            Namespace::Keyword => write!(f, ":{}", self.name()),
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol")
            .field("name", &self.name())
            .field("namespace", &self.namespace())
            .finish()
    }
}

/// The interning table.
///
/// One sub-table per namespace, keyed by name. Entries are never removed.
pub struct SymbolTable {
    tables: [FastHashMap<Rc<str>, Symbol>; 4],
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            tables: [fast_map_new(), fast_map_new(), fast_map_new(), fast_map_new()],
        }
    }

    /// Return the symbol for `(name, namespace)`, creating it on first use.
    pub fn intern(&mut self, name: &str, namespace: Namespace) -> Symbol {
        let table = &mut self.tables[namespace.index()];
        if let Some(sym) = table.get(name) {
            return sym.clone();
        }
        let name: Rc<str> = Rc::from(name);
        let sym = Symbol(Rc::new(SymbolData {
            name: name.clone(),
            namespace,
        }));
        tracing::trace!(name = %name, %namespace, "interned symbol");
        table.insert(name, sym.clone());
        sym
    }

    /// Look up an existing symbol without creating one.
    pub fn find(&self, name: &str, namespace: Namespace) -> Option<Symbol> {
        self.tables[namespace.index()].get(name).cloned()
    }

    /// Same name, other namespace.
    #[inline]
    pub fn to_namespace(&mut self, sym: &Symbol, namespace: Namespace) -> Symbol {
        self.intern(sym.name(), namespace)
    }

    #[inline]
    pub fn to_variable(&mut self, sym: &Symbol) -> Symbol {
        self.to_namespace(sym, Namespace::Variable)
    }

    #[inline]
    pub fn to_function(&mut self, sym: &Symbol) -> Symbol {
        self.to_namespace(sym, Namespace::Function)
    }

    #[inline]
    pub fn to_class(&mut self, sym: &Symbol) -> Symbol {
        self.to_namespace(sym, Namespace::Class)
    }

    #[inline]
    pub fn to_keyword(&mut self, sym: &Symbol) -> Symbol {
        self.to_namespace(sym, Namespace::Keyword)
    }

    /// Total number of interned symbols across all namespaces.
    pub fn len(&self) -> usize {
        self.tables.iter().map(|t| t.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
