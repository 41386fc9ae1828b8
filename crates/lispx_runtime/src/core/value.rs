//! Runtime value representation.
//!
//! `Value` is a closed union. Host values are primitives the runtime does not
//! model (they all classify as `object`); every other variant is a runtime
//! value with a fixed built-in class, except `Object`, which carries the
//! class it was instantiated from.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use lispx_core::{Decimal, Symbol};
use smallvec::SmallVec;

use super::class::{BuiltinClass, ClassId};
use super::env::Environment;
use super::object::StandardObject;
use super::stream::{StringInputStream, StringOutputStream};
use crate::conditions::Result;
use crate::vm::Vm;

pub type HostFn = Rc<dyn Fn(&[Value]) -> Value>;

/// Built-in operators receive their arguments as a Lisp list.
pub type BuiltinFn = Rc<dyn Fn(&mut Vm, Value) -> Result<Value>>;

/// Host primitives not otherwise modeled by the runtime.
#[derive(Clone)]
pub enum HostValue {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Object(Rc<dyn Any>),
    Function(HostFn),
}

impl HostValue {
    /// Strict host equality: by value for primitives, by identity otherwise.
    pub fn strict_eq(&self, other: &HostValue) -> bool {
        match (self, other) {
            (HostValue::Null, HostValue::Null) => true,
            (HostValue::Undefined, HostValue::Undefined) => true,
            (HostValue::Bool(a), HostValue::Bool(b)) => a == b,
            (HostValue::Number(a), HostValue::Number(b)) => a == b,
            (HostValue::String(a), HostValue::String(b)) => a == b,
            (HostValue::Object(a), HostValue::Object(b)) => Rc::ptr_eq(a, b),
            (HostValue::Function(a), HostValue::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Intrinsic representation tag, as matched by string type specs.
    pub fn tag(&self) -> &'static str {
        match self {
            HostValue::Null | HostValue::Object(_) => "object",
            HostValue::Undefined => "undefined",
            HostValue::Bool(_) => "boolean",
            HostValue::Number(_) => "number",
            HostValue::String(_) => "string",
            HostValue::Function(_) => "function",
        }
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Null => f.write_str("null"),
            HostValue::Undefined => f.write_str("undefined"),
            HostValue::Bool(b) => write!(f, "{b}"),
            HostValue::Number(n) => write!(f, "{n}"),
            HostValue::String(s) => write!(f, "{s:?}"),
            HostValue::Object(_) => f.write_str("#<host object>"),
            HostValue::Function(_) => f.write_str("#<host function>"),
        }
    }
}

/// A mutable pair.
pub struct Cons {
    car: RefCell<Value>,
    cdr: RefCell<Value>,
}

impl Cons {
    pub fn new(car: Value, cdr: Value) -> Self {
        Self {
            car: RefCell::new(car),
            cdr: RefCell::new(cdr),
        }
    }

    #[inline]
    pub fn car(&self) -> Value {
        self.car.borrow().clone()
    }

    #[inline]
    pub fn cdr(&self) -> Value {
        self.cdr.borrow().clone()
    }

    pub fn set_car(&self, value: Value) {
        *self.car.borrow_mut() = value;
    }

    pub fn set_cdr(&self, value: Value) {
        *self.cdr.borrow_mut() = value;
    }
}

// Deep lists would otherwise drop recursively, through tails and through
// nested heads alike.
impl Drop for Cons {
    fn drop(&mut self) {
        let mut pending: SmallVec<[Rc<Cons>; 8]> = SmallVec::new();
        take_cons(self.car.get_mut(), &mut pending);
        take_cons(self.cdr.get_mut(), &mut pending);
        while let Some(rc) = pending.pop() {
            if let Ok(mut cell) = Rc::try_unwrap(rc) {
                take_cons(cell.car.get_mut(), &mut pending);
                take_cons(cell.cdr.get_mut(), &mut pending);
            }
        }
    }
}

fn take_cons(slot: &mut Value, pending: &mut SmallVec<[Rc<Cons>; 8]>) {
    if matches!(slot, Value::Cons(_)) {
        if let Value::Cons(rc) = std::mem::replace(slot, Value::Nil) {
            pending.push(rc);
        }
    }
}

/// Operator data. Evaluation is done elsewhere; fexprs are plain records.
pub enum Operator {
    BuiltIn { name: Symbol, func: BuiltinFn },
    Fexpr(Fexpr),
    /// A function wrapping an underlying operator.
    Function(Value),
}

pub struct Fexpr {
    pub param_tree: Value,
    pub env_param: Value,
    pub body: Value,
    pub env: Environment,
}

#[derive(Clone)]
pub enum Value {
    Host(HostValue),
    Boolean(bool),
    Number(Rc<Decimal>),
    String(Rc<str>),
    Symbol(Symbol),
    Cons(Rc<Cons>),
    Nil,
    Void,
    Ignore,
    Environment(Environment),
    Class(ClassId),
    Operator(Rc<Operator>),
    InputStream(Rc<RefCell<StringInputStream>>),
    OutputStream(Rc<RefCell<StringOutputStream>>),
    Object(StandardObject),
}

impl Value {
    pub const NULL: Value = Value::Host(HostValue::Null);
    pub const UNDEFINED: Value = Value::Host(HostValue::Undefined);
    pub const T: Value = Value::Boolean(true);
    pub const F: Value = Value::Boolean(false);
    pub const NIL: Value = Value::Nil;
    pub const VOID: Value = Value::Void;
    pub const IGNORE: Value = Value::Ignore;

    #[inline]
    pub fn str(s: &str) -> Self {
        Value::String(Rc::from(s))
    }

    #[inline]
    pub fn num(n: impl Into<Decimal>) -> Self {
        Value::Number(Rc::new(n.into()))
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::Boolean(b)
    }

    #[inline]
    pub fn cons(car: Value, cdr: Value) -> Self {
        Value::Cons(Rc::new(Cons::new(car, cdr)))
    }

    /// Proper list of `items`.
    pub fn list(items: impl IntoIterator<Item = Value, IntoIter: DoubleEndedIterator>) -> Self {
        items
            .into_iter()
            .rev()
            .fold(Value::Nil, |tail, item| Value::cons(item, tail))
    }

    /// Like `list`, but the last item is the tail instead of `nil`.
    pub fn list_star(items: Vec<Value>) -> Self {
        let mut items = items;
        match items.pop() {
            None => Value::Nil,
            Some(tail) => items
                .into_iter()
                .rev()
                .fold(tail, |tail, item| Value::cons(item, tail)),
        }
    }

    /// One-element list, the "some" case of an optional value.
    pub fn some(value: Value) -> Self {
        Value::cons(value, Value::Nil)
    }

    #[inline]
    pub fn host_bool(b: bool) -> Self {
        Value::Host(HostValue::Bool(b))
    }

    #[inline]
    pub fn host_num(n: f64) -> Self {
        Value::Host(HostValue::Number(n))
    }

    #[inline]
    pub fn host_str(s: &str) -> Self {
        Value::Host(HostValue::String(Rc::from(s)))
    }

    pub fn host_object<T: Any>(obj: T) -> Self {
        Value::Host(HostValue::Object(Rc::new(obj)))
    }

    pub fn host_fn(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Value::Host(HostValue::Function(Rc::new(f)))
    }

    /// True for values governed by the runtime, false for host values.
    #[inline]
    pub fn is_lisp_object(&self) -> bool {
        !matches!(self, Value::Host(_))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Host(HostValue::Null))
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Host(HostValue::Undefined))
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Intrinsic representation tag, independent of the class graph.
    pub fn tag(&self) -> &'static str {
        match self {
            Value::Host(h) => h.tag(),
            _ => "object",
        }
    }

    /// Fixed built-in class of this value's representation. `None` for
    /// classes and standard objects, whose class depends on the class graph.
    pub fn builtin_class(&self) -> Option<BuiltinClass> {
        let class = match self {
            Value::Host(_) => BuiltinClass::Object,
            Value::Boolean(_) => BuiltinClass::Boolean,
            Value::Number(_) => BuiltinClass::Number,
            Value::String(_) => BuiltinClass::String,
            Value::Symbol(_) => BuiltinClass::Symbol,
            Value::Cons(_) => BuiltinClass::Cons,
            Value::Nil => BuiltinClass::Nil,
            Value::Void => BuiltinClass::Void,
            Value::Ignore => BuiltinClass::Ignore,
            Value::Environment(_) => BuiltinClass::Environment,
            Value::Operator(op) => match op.as_ref() {
                Operator::BuiltIn { .. } => BuiltinClass::BuiltInOperator,
                Operator::Fexpr(_) => BuiltinClass::Fexpr,
                Operator::Function(_) => BuiltinClass::Function,
            },
            Value::InputStream(_) => BuiltinClass::StringInputStream,
            Value::OutputStream(_) => BuiltinClass::StringOutputStream,
            Value::Class(_) | Value::Object(_) => return None,
        };
        Some(class)
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Decimal> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// UTF-8 encoding of a runtime string.
    pub fn utf8_bytes(&self) -> Option<&[u8]> {
        self.as_str().map(str::as_bytes)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_cons(&self) -> Option<&Cons> {
        match self {
            Value::Cons(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<ClassId> {
        match self {
            Value::Class(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_environment(&self) -> Option<&Environment> {
        match self {
            Value::Environment(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&StandardObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<&Operator> {
        match self {
            Value::Operator(op) => Some(op),
            _ => None,
        }
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Value::Symbol(sym)
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Value::Number(Rc::new(n))
    }
}

impl From<ClassId> for Value {
    fn from(id: ClassId) -> Self {
        Value::Class(id)
    }
}

impl From<Environment> for Value {
    fn from(env: Environment) -> Self {
        Value::Environment(env)
    }
}

impl From<StandardObject> for Value {
    fn from(obj: StandardObject) -> Self {
        Value::Object(obj)
    }
}

impl From<HostValue> for Value {
    fn from(h: HostValue) -> Self {
        Value::Host(h)
    }
}

/// Generic value equality.
///
/// Host values compare strictly (`Null` and `Undefined` are distinct).
/// Strings, numbers and conses compare by value, symbols by identity, and
/// everything else by identity.
pub fn equal(a: &Value, b: &Value) -> bool {
    let mut pending: SmallVec<[(Value, Value); 8]> = SmallVec::new();
    pending.push((a.clone(), b.clone()));
    while let Some((a, b)) = pending.pop() {
        match (&a, &b) {
            (Value::Cons(x), Value::Cons(y)) => {
                if !Rc::ptr_eq(x, y) {
                    pending.push((x.cdr(), y.cdr()));
                    pending.push((x.car(), y.car()));
                }
            }
            _ => {
                if !equal_atom(&a, &b) {
                    return false;
                }
            }
        }
    }
    true
}

fn equal_atom(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Host(x), Value::Host(y)) => x.strict_eq(y),
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Nil, Value::Nil) | (Value::Void, Value::Void) | (Value::Ignore, Value::Ignore) => {
            true
        }
        (Value::Environment(x), Value::Environment(y)) => x.ptr_eq(y),
        (Value::Class(x), Value::Class(y)) => x == y,
        (Value::Operator(x), Value::Operator(y)) => Rc::ptr_eq(x, y),
        (Value::InputStream(x), Value::InputStream(y)) => Rc::ptr_eq(x, y),
        (Value::OutputStream(x), Value::OutputStream(y)) => Rc::ptr_eq(x, y),
        (Value::Object(x), Value::Object(y)) => x.ptr_eq(y),
        _ => false,
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Host(h) => write!(f, "Host({h:?})"),
            Value::Boolean(true) => f.write_str("#t"),
            Value::Boolean(false) => f.write_str("#f"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::Cons(_) => {
                f.write_str("(")?;
                let mut cur = self.clone();
                let mut first = true;
                loop {
                    match cur {
                        Value::Cons(c) => {
                            if !first {
                                f.write_str(" ")?;
                            }
                            first = false;
                            write!(f, "{:?}", c.car())?;
                            cur = c.cdr();
                        }
                        Value::Nil => break,
                        other => {
                            write!(f, " . {other:?}")?;
                            break;
                        }
                    }
                }
                f.write_str(")")
            }
            Value::Nil => f.write_str("#nil"),
            Value::Void => f.write_str("#void"),
            Value::Ignore => f.write_str("#ignore"),
            Value::Environment(e) => write!(f, "{e:?}"),
            Value::Class(id) => write!(f, "#<class {}>", id.0),
            Value::Operator(op) => match op.as_ref() {
                Operator::BuiltIn { name, .. } => write!(f, "#<built-in-operator {name}>"),
                Operator::Fexpr(_) => f.write_str("#<fexpr>"),
                Operator::Function(inner) => write!(f, "#<function {inner:?}>"),
            },
            Value::InputStream(_) => f.write_str("#<string-input-stream>"),
            Value::OutputStream(_) => f.write_str("#<string-output-stream>"),
            Value::Object(o) => write!(f, "{o:?}"),
        }
    }
}
