//! Operator construction and host-side calls into built-in operators.

use std::rc::Rc;

use super::Vm;
use crate::conditions::Result;
use crate::core::class::BuiltinClass;
use crate::core::env::Environment;
use crate::core::value::{Fexpr, Operator, Value};
use crate::errors::messages;
use crate::types::TypeSpec;

impl Vm {
    pub fn make_builtin_operator(
        &mut self,
        name: &str,
        func: impl Fn(&mut Vm, Value) -> Result<Value> + 'static,
    ) -> Value {
        let name = self.fsym(name);
        Value::Operator(Rc::new(Operator::BuiltIn {
            name,
            func: Rc::new(func),
        }))
    }

    /// Record a fexpr. Its body is only meaningful to an evaluator.
    pub fn make_fexpr(
        &self,
        param_tree: Value,
        env_param: Value,
        body: Value,
        env: Environment,
    ) -> Value {
        Value::Operator(Rc::new(Operator::Fexpr(Fexpr {
            param_tree,
            env_param,
            body,
            env,
        })))
    }

    /// Wrap an operator into a function.
    pub fn wrap(&self, operator: &Value) -> Result<Value> {
        let operator = self.assert_type(operator.clone(), &TypeSpec::class(BuiltinClass::Operator))?;
        Ok(Value::Operator(Rc::new(Operator::Function(operator))))
    }

    /// The operator underlying a function.
    pub fn unwrap(&self, function: &Value) -> Result<Value> {
        match function.as_operator() {
            Some(Operator::Function(inner)) => Ok(inner.clone()),
            _ => Err(self.type_error(function.clone(), &TypeSpec::class(BuiltinClass::Function))),
        }
    }

    /// Bind a wrapped built-in operator under the function symbol `name` in
    /// the root environment.
    pub fn define_builtin_function(
        &mut self,
        name: &str,
        func: impl Fn(&mut Vm, Value) -> Result<Value> + 'static,
    ) -> Result<Value> {
        let operator = self.make_builtin_operator(name, func);
        let function = self.wrap(&operator)?;
        let key = self.fsym(name);
        self.root.put(key, function.clone());
        Ok(function)
    }

    /// Call a built-in operator, or a chain of functions wrapping one, with an
    /// argument list. Fexprs need an evaluator and are rejected.
    pub fn apply_builtin(&mut self, operator: &Value, args: Value) -> Result<Value> {
        let mut current = operator.clone();
        loop {
            let next = match current.as_operator() {
                Some(Operator::Function(inner)) => inner.clone(),
                Some(Operator::BuiltIn { func, .. }) => {
                    let func = func.clone();
                    return func(self, args);
                }
                _ => return Err(self.assertion_error(messages::NOT_A_BUILTIN_OPERATOR)),
            };
            current = next;
        }
    }
}
