//! Class metaobjects.
//!
//! Classes live in an arena owned by the `Vm` and are addressed by `ClassId`.
//! Each record points at its single superclass; only `object` has none.
//! The built-in classes occupy the first slots of the arena in the order of
//! `BUILTIN_CLASSES`, so `BuiltinClass::id` is a constant-time mapping.

use lispx_core::Symbol;

/// Handle to a class record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub(crate) u32);

/// The class of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metaclass {
    BuiltIn,
    Standard,
}

impl Metaclass {
    /// The class record of the metaclass itself.
    #[inline]
    pub fn class_id(self) -> ClassId {
        match self {
            Metaclass::BuiltIn => BuiltinClass::BuiltInClass.id(),
            Metaclass::Standard => BuiltinClass::StandardClass.id(),
        }
    }
}

/// Concrete representation behind a class.
///
/// Built-in classes are tied to a fixed value kind. Every standard class gets
/// a fresh token, so no two standard classes share a representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repr {
    BuiltIn(BuiltinClass),
    Standard(u32),
}

#[derive(Debug, Clone)]
pub struct ClassRecord {
    pub name: Symbol,
    pub superclass: Option<ClassId>,
    pub metaclass: Metaclass,
    pub repr: Repr,
}

/// Classes created at bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BuiltinClass {
    Object,
    String,
    Symbol,
    Number,
    Boolean,
    List,
    Cons,
    Nil,
    Void,
    Ignore,
    Environment,
    Class,
    BuiltInClass,
    StandardClass,
    Operator,
    BuiltInOperator,
    Fexpr,
    Function,
    Continuation,
    InputStream,
    StringInputStream,
    OutputStream,
    StringOutputStream,
    StandardObject,
    Dynamic,
    Condition,
    Error,
    TypeError,
    UnboundSymbolError,
    UnboundSlotError,
    UnboundMethodError,
    AssertionError,
    MatchError,
    StreamError,
    EndOfFile,
    ReaderError,
    PromptNotFoundError,
}

pub struct BuiltinClassSpec {
    pub class: BuiltinClass,
    pub name: &'static str,
    pub superclass: Option<BuiltinClass>,
    pub metaclass: Metaclass,
}

const fn spec(
    class: BuiltinClass,
    name: &'static str,
    superclass: Option<BuiltinClass>,
    metaclass: Metaclass,
) -> BuiltinClassSpec {
    BuiltinClassSpec {
        class,
        name,
        superclass,
        metaclass,
    }
}

use BuiltinClass as B;
use Metaclass::{BuiltIn as BI, Standard as ST};

/// Superclasses always precede their subclasses.
pub static BUILTIN_CLASSES: [BuiltinClassSpec; 37] = [
    spec(B::Object, "object", None, BI),
    spec(B::String, "string", Some(B::Object), BI),
    spec(B::Symbol, "symbol", Some(B::Object), BI),
    spec(B::Number, "number", Some(B::Object), BI),
    spec(B::Boolean, "boolean", Some(B::Object), BI),
    spec(B::List, "list", Some(B::Object), BI),
    spec(B::Cons, "cons", Some(B::List), BI),
    spec(B::Nil, "nil", Some(B::List), BI),
    spec(B::Void, "void", Some(B::Object), BI),
    spec(B::Ignore, "ignore", Some(B::Object), BI),
    spec(B::Environment, "environment", Some(B::Object), BI),
    spec(B::Class, "class", Some(B::Object), BI),
    spec(B::BuiltInClass, "built-in-class", Some(B::Class), BI),
    spec(B::StandardClass, "standard-class", Some(B::Class), BI),
    spec(B::Operator, "operator", Some(B::Object), BI),
    spec(B::BuiltInOperator, "built-in-operator", Some(B::Operator), BI),
    spec(B::Fexpr, "fexpr", Some(B::Operator), BI),
    spec(B::Function, "function", Some(B::Operator), BI),
    spec(B::Continuation, "continuation", Some(B::Object), BI),
    spec(B::InputStream, "input-stream", Some(B::Object), BI),
    spec(B::StringInputStream, "string-input-stream", Some(B::InputStream), BI),
    spec(B::OutputStream, "output-stream", Some(B::Object), BI),
    spec(B::StringOutputStream, "string-output-stream", Some(B::OutputStream), BI),
    spec(B::StandardObject, "standard-object", Some(B::Object), ST),
    spec(B::Dynamic, "dynamic", Some(B::StandardObject), ST),
    spec(B::Condition, "condition", Some(B::StandardObject), ST),
    spec(B::Error, "error", Some(B::Condition), ST),
    spec(B::TypeError, "type-error", Some(B::Error), ST),
    spec(B::UnboundSymbolError, "unbound-symbol-error", Some(B::Error), ST),
    spec(B::UnboundSlotError, "unbound-slot-error", Some(B::Error), ST),
    spec(B::UnboundMethodError, "unbound-method-error", Some(B::Error), ST),
    spec(B::AssertionError, "assertion-error", Some(B::Error), ST),
    spec(B::MatchError, "match-error", Some(B::Error), ST),
    spec(B::StreamError, "stream-error", Some(B::Error), ST),
    spec(B::EndOfFile, "end-of-file", Some(B::StreamError), ST),
    spec(B::ReaderError, "reader-error", Some(B::Error), ST),
    spec(B::PromptNotFoundError, "prompt-not-found-error", Some(B::Error), ST),
];

impl BuiltinClass {
    #[inline]
    pub fn id(self) -> ClassId {
        ClassId(self as u32)
    }

    #[inline]
    pub fn spec(self) -> &'static BuiltinClassSpec {
        &BUILTIN_CLASSES[self as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

/// Arena of class records.
pub struct ClassGraph {
    records: Vec<ClassRecord>,
    next_repr: u32,
}

impl ClassGraph {
    pub fn new() -> Self {
        Self {
            records: Vec::with_capacity(BUILTIN_CLASSES.len() * 2),
            next_repr: 0,
        }
    }

    pub fn add(&mut self, record: ClassRecord) -> ClassId {
        let id = ClassId(self.records.len() as u32);
        self.records.push(record);
        id
    }

    /// Mint a representation token no other class uses.
    pub fn fresh_repr(&mut self) -> Repr {
        let token = self.next_repr;
        self.next_repr += 1;
        Repr::Standard(token)
    }

    #[inline]
    pub fn contains(&self, id: ClassId) -> bool {
        (id.0 as usize) < self.records.len()
    }

    /// Map ids minted by another graph (another `Vm`) that fall outside this
    /// one onto `object`.
    #[inline]
    pub fn resolve(&self, id: ClassId) -> ClassId {
        if self.contains(id) {
            id
        } else {
            BuiltinClass::Object.id()
        }
    }

    /// Total once the built-in classes are in place.
    #[inline]
    pub fn get(&self, id: ClassId) -> &ClassRecord {
        &self.records[self.resolve(id).0 as usize]
    }

    /// The class itself followed by its ancestors up to `object`.
    pub fn ancestors(&self, id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        std::iter::successors(Some(self.resolve(id)), move |c| self.get(*c).superclass)
    }

    /// Reflexive, transitive superclass relation.
    pub fn is_subclass(&self, sub: ClassId, sup: ClassId) -> bool {
        self.ancestors(sub).any(|c| c == sup)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<BuiltinClass> for ClassId {
    fn from(class: BuiltinClass) -> Self {
        class.id()
    }
}
