//! Standard objects.
//!
//! A standard object is a class handle plus a slot table. Slots are created
//! on first write and keep first-write order. Key normalization (keyword
//! aliases) is the `Vm`'s job; this layer stores whatever symbol it is given.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ahash::RandomState;
use indexmap::IndexMap;
use lispx_core::{Symbol, fast_hasher};

use super::class::ClassId;
use super::value::Value;

pub type SlotTable = IndexMap<Symbol, Value, RandomState>;

struct ObjectData {
    class: ClassId,
    slots: RefCell<SlotTable>,
}

/// Shared handle to a standard object. Equality is identity.
#[derive(Clone)]
pub struct StandardObject(Rc<ObjectData>);

impl StandardObject {
    pub fn new(class: ClassId) -> Self {
        Self(Rc::new(ObjectData {
            class,
            slots: RefCell::new(IndexMap::with_hasher(fast_hasher())),
        }))
    }

    #[inline]
    pub fn class(&self) -> ClassId {
        self.0.class
    }

    pub fn get(&self, key: &Symbol) -> Option<Value> {
        self.0.slots.borrow().get(key).cloned()
    }

    /// Create or overwrite.
    pub fn set(&self, key: Symbol, value: Value) {
        self.0.slots.borrow_mut().insert(key, value);
    }

    pub fn is_bound(&self, key: &Symbol) -> bool {
        self.0.slots.borrow().contains_key(key)
    }

    pub fn slot_count(&self) -> usize {
        self.0.slots.borrow().len()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for StandardObject {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for StandardObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.0.slots.borrow();
        f.debug_struct("StandardObject")
            .field("class", &self.0.class)
            .field("slots", &slots.keys().map(|k| k.name()).collect::<Vec<_>>())
            .finish()
    }
}
