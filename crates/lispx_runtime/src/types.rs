//! Type specs.
//!
//! A small structural language for run-time type checks:
//! - `Tag` - matches the intrinsic representation tag (`Value::tag`)
//! - `Class` - matches instances of the class or any subclass
//! - `Any` / `Null` - everything / only the host null
//! - `Or` - any member matches; the empty `Or` matches nothing
//!
//! Specs can be rendered to Lisp data and parsed back from it.

use std::rc::Rc;

use lispx_core::Namespace;
use smallvec::SmallVec;

use crate::conditions::Result;
use crate::core::class::{BuiltinClass, ClassId};
use crate::core::value::Value;
use crate::errors::messages;
use crate::vm::Vm;

#[derive(Clone, Debug)]
pub enum TypeSpec {
    Any,
    Null,
    Tag(Rc<str>),
    Class(ClassId),
    Or(Rc<[TypeSpec]>),
}

impl TypeSpec {
    pub const ANY: TypeSpec = TypeSpec::Any;
    pub const NULL: TypeSpec = TypeSpec::Null;

    pub fn tag(name: &str) -> Self {
        TypeSpec::Tag(Rc::from(name))
    }

    pub fn class(class: impl Into<ClassId>) -> Self {
        TypeSpec::Class(class.into())
    }
}

pub fn type_or(specs: impl IntoIterator<Item = TypeSpec>) -> TypeSpec {
    TypeSpec::Or(specs.into_iter().collect())
}

impl Vm {
    pub fn has_type(&self, value: &Value, spec: &TypeSpec) -> bool {
        match spec {
            TypeSpec::Any => true,
            TypeSpec::Null => value.is_null(),
            TypeSpec::Tag(tag) => value.tag() == &**tag,
            TypeSpec::Class(class) => self.is_subclass(self.class_of(value), *class),
            TypeSpec::Or(specs) => specs.iter().any(|s| self.has_type(value, s)),
        }
    }

    /// Like `has_type`, with the spec given as Lisp data.
    pub fn has_type_lisp(&self, value: &Value, spec: &Value) -> Result<bool> {
        let spec = self.type_spec_from_lisp(spec)?;
        Ok(self.has_type(value, &spec))
    }

    /// Return `value` unchanged if it matches, else fail with a `type-error`.
    pub fn assert_type(&self, value: Value, spec: &TypeSpec) -> Result<Value> {
        if self.has_type(&value, spec) {
            Ok(value)
        } else {
            Err(self.type_error(value, spec))
        }
    }

    /// Render a spec as symbolic data.
    pub fn to_lisp_type_spec(&self, spec: &TypeSpec) -> Value {
        match spec {
            TypeSpec::Any => Value::Symbol(self.class_name(BuiltinClass::Object.id()).clone()),
            TypeSpec::Null => Value::str("null"),
            TypeSpec::Tag(tag) => Value::String(tag.clone()),
            TypeSpec::Class(class) => Value::Symbol(self.class_name(*class).clone()),
            TypeSpec::Or(specs) => {
                let items: SmallVec<[Value; 8]> = std::iter::once(Value::Symbol(self.names.or.clone()))
                    .chain(specs.iter().map(|s| self.to_lisp_type_spec(s)))
                    .collect();
                Value::list(items)
            }
        }
    }

    /// Parse symbolic data back into a spec.
    ///
    /// The string `"null"` is the null spec, other strings are tags, class
    /// names and class metaobjects are class specs, and `(or ...)` lists are
    /// unions. Anything else is an unknown type spec.
    pub fn type_spec_from_lisp(&self, spec: &Value) -> Result<TypeSpec> {
        match spec {
            Value::String(s) if &**s == "null" => Ok(TypeSpec::Null),
            Value::String(s) => Ok(TypeSpec::Tag(s.clone())),
            Value::Class(class) => Ok(TypeSpec::Class(*class)),
            Value::Symbol(sym) if sym.namespace() == Namespace::Variable => {
                match self.find_class(sym.name()) {
                    Some(class) if class == BuiltinClass::Object.id() => Ok(TypeSpec::Any),
                    Some(class) => Ok(TypeSpec::Class(class)),
                    None => Err(self.assertion_error(messages::UNKNOWN_TYPE_SPEC)),
                }
            }
            Value::Cons(c) if matches!(c.car(), Value::Symbol(ref s) if *s == self.names.or) => {
                let members = self.list_to_array(&c.cdr())?;
                let specs = members
                    .iter()
                    .map(|m| self.type_spec_from_lisp(m))
                    .collect::<Result<Rc<[TypeSpec]>>>()?;
                Ok(TypeSpec::Or(specs))
            }
            _ => Err(self.assertion_error(messages::UNKNOWN_TYPE_SPEC)),
        }
    }

    /// Human-readable form used in condition messages.
    pub(crate) fn render_type_spec(&self, spec: &TypeSpec) -> String {
        match spec {
            TypeSpec::Any => self.class_name(BuiltinClass::Object.id()).name().to_string(),
            TypeSpec::Null => "\"null\"".to_string(),
            TypeSpec::Tag(tag) => format!("{:?}", &**tag),
            TypeSpec::Class(class) => self.class_name(*class).name().to_string(),
            TypeSpec::Or(specs) => {
                let mut out = String::from("(or");
                for s in specs.iter() {
                    out.push(' ');
                    out.push_str(&self.render_type_spec(s));
                }
                out.push(')');
                out
            }
        }
    }
}
