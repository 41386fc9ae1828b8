//! List helpers that can fail on improper input.

use super::Vm;
use crate::conditions::Result;
use crate::core::class::BuiltinClass;
use crate::core::value::Value;
use crate::types::TypeSpec;

impl Vm {
    /// Elements of a proper list. Improper tails are type errors.
    pub fn list_to_array(&self, list: &Value) -> Result<Vec<Value>> {
        let mut out = Vec::new();
        let mut cur = list.clone();
        loop {
            match cur {
                Value::Nil => return Ok(out),
                Value::Cons(c) => {
                    out.push(c.car());
                    cur = c.cdr();
                }
                other => {
                    return Err(self.type_error(other, &TypeSpec::class(BuiltinClass::List)));
                }
            }
        }
    }

    pub fn array_to_list(&self, items: &[Value]) -> Value {
        Value::list(items.iter().cloned())
    }

    /// The `index`-th element; running off the list is a type error.
    pub fn elt(&self, list: &Value, index: usize) -> Result<Value> {
        let mut cur = list.clone();
        for _ in 0..index {
            let next = match &cur {
                Value::Cons(c) => c.cdr(),
                other => {
                    return Err(self.type_error(other.clone(), &TypeSpec::class(BuiltinClass::Cons)));
                }
            };
            cur = next;
        }
        match &cur {
            Value::Cons(c) => Ok(c.car()),
            other => Err(self.type_error(other.clone(), &TypeSpec::class(BuiltinClass::Cons))),
        }
    }

    pub fn reverse(&self, list: &Value) -> Result<Value> {
        let items = self.list_to_array(list)?;
        Ok(items
            .into_iter()
            .fold(Value::Nil, |tail, item| Value::cons(item, tail)))
    }

    /// Fresh copy of `front` ending in `back`. `back` is shared, not copied.
    pub fn append(&self, front: &Value, back: &Value) -> Result<Value> {
        let items = self.list_to_array(front)?;
        Ok(items
            .into_iter()
            .rev()
            .fold(back.clone(), |tail, item| Value::cons(item, tail)))
    }
}
