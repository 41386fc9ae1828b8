use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use lispx_core::{FastHashMap, Symbol, fast_map_new};

use super::Value;
use crate::conditions::Result;
use crate::vm::Vm;

struct Frame {
    bindings: RefCell<FastHashMap<Symbol, Value>>,
    parent: Option<Environment>,
}

/// A mutable symbol-to-value map with an optional parent.
///
/// Lookups walk outward through the parents; `put` only ever touches the
/// local map, which is how inner bindings shadow outer ones. Parents never
/// point back at their children.
#[derive(Clone)]
pub struct Environment(Rc<Frame>);

impl Environment {
    pub fn new(parent: Option<&Environment>) -> Self {
        Self(Rc::new(Frame {
            bindings: RefCell::new(fast_map_new()),
            parent: parent.cloned(),
        }))
    }

    #[inline]
    pub fn parent(&self) -> Option<&Environment> {
        self.0.parent.as_ref()
    }

    /// Create or overwrite a local binding.
    pub fn put(&self, sym: Symbol, value: Value) {
        self.0.bindings.borrow_mut().insert(sym, value);
    }

    /// Search this environment, then its ancestors.
    pub fn get(&self, sym: &Symbol) -> Option<Value> {
        let mut env = Some(self);
        while let Some(e) = env {
            if let Some(v) = e.0.bindings.borrow().get(sym) {
                return Some(v.clone());
            }
            env = e.parent();
        }
        None
    }

    /// Like `get`, failing with an `unbound-symbol-error`.
    pub fn lookup(&self, vm: &Vm, sym: &Symbol) -> Result<Value> {
        self.get(sym)
            .ok_or_else(|| vm.unbound_symbol_error(sym, self))
    }

    pub fn is_bound(&self, sym: &Symbol) -> bool {
        let mut env = Some(self);
        while let Some(e) = env {
            if e.0.bindings.borrow().contains_key(sym) {
                return true;
            }
            env = e.parent();
        }
        false
    }

    /// Local binding only, ignoring ancestors.
    pub fn get_local(&self, sym: &Symbol) -> Option<Value> {
        self.0.bindings.borrow().get(sym).cloned()
    }

    pub fn local_len(&self) -> usize {
        self.0.bindings.borrow().len()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("bindings", &self.local_len())
            .field("has_parent", &self.0.parent.is_some())
            .finish()
    }
}
