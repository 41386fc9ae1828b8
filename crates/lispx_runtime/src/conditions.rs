//! Conditions: structured errors as standard objects.
//!
//! Every failure raised by the runtime is a `Condition` wrapping an instance
//! of a class under `condition`. The instance always has a `message` slot;
//! the constructors below add the kind-specific slots.

use lispx_core::Symbol;

use crate::core::class::{BuiltinClass, ClassId};
use crate::core::env::Environment;
use crate::core::object::StandardObject;
use crate::core::value::Value;
use crate::errors::messages;
use crate::types::TypeSpec;
use crate::vm::Vm;

pub type Result<T> = std::result::Result<T, Condition>;

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct Condition {
    object: StandardObject,
    message: String,
}

impl Condition {
    #[inline]
    pub fn object(&self) -> &StandardObject {
        &self.object
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.object.clone())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn class(&self) -> ClassId {
        self.object.class()
    }

    pub fn is_a(&self, vm: &Vm, class: impl Into<ClassId>) -> bool {
        vm.is_subclass(self.class(), class.into())
    }

    /// Slot named by the variable symbol `name`, if that symbol exists.
    pub fn slot(&self, vm: &Vm, name: &str) -> Option<Value> {
        let key = vm.symbols.find(name, lispx_core::Namespace::Variable)?;
        self.object.get(&key)
    }
}

impl Vm {
    /// Instantiate a condition of `class` with a `message` slot and `slots`.
    pub fn make_condition(
        &self,
        class: impl Into<ClassId>,
        message: impl Into<String>,
        slots: Vec<(Symbol, Value)>,
    ) -> Condition {
        let message = message.into();
        let object = StandardObject::new(class.into());
        object.set(self.names.message.clone(), Value::str(&message));
        for (key, value) in slots {
            object.set(key, value);
        }
        Condition { object, message }
    }

    pub fn type_error(&self, datum: Value, expected: &TypeSpec) -> Condition {
        let message = format!(
            "{}: expected {}",
            messages::TYPE_ASSERTION_FAILED,
            self.render_type_spec(expected)
        );
        let slots = vec![
            (self.names.datum.clone(), datum),
            (self.names.expected_type.clone(), self.to_lisp_type_spec(expected)),
        ];
        self.make_condition(BuiltinClass::TypeError, message, slots)
    }

    pub fn unbound_symbol_error(&self, sym: &Symbol, env: &Environment) -> Condition {
        let message = format!("Unbound {}: {}", sym.namespace(), sym.name());
        let slots = vec![
            (self.names.symbol.clone(), Value::Symbol(sym.clone())),
            (self.names.environment.clone(), Value::Environment(env.clone())),
        ];
        self.make_condition(BuiltinClass::UnboundSymbolError, message, slots)
    }

    pub fn unbound_slot_error(&self, obj: &Value, slot_name: &Symbol) -> Condition {
        let message = format!("{}: {}", messages::UNBOUND_SLOT, slot_name.name());
        let slots = vec![
            (self.names.object.clone(), obj.clone()),
            (self.names.slot_name.clone(), Value::Symbol(slot_name.clone())),
        ];
        self.make_condition(BuiltinClass::UnboundSlotError, message, slots)
    }

    pub fn unbound_method_error(&self, class: ClassId, method_name: &Symbol) -> Condition {
        let message = format!(
            "{}: {} for class {}",
            messages::UNBOUND_METHOD,
            method_name.name(),
            self.class_name(class).name()
        );
        let slots = vec![
            (self.names.class.clone(), Value::Class(class)),
            (self.names.method_name.clone(), Value::Symbol(method_name.clone())),
        ];
        self.make_condition(BuiltinClass::UnboundMethodError, message, slots)
    }

    pub fn assertion_error(&self, message: impl Into<String>) -> Condition {
        self.make_condition(BuiltinClass::AssertionError, message, Vec::new())
    }

    pub fn match_error(&self, datum: Value) -> Condition {
        let slots = vec![(self.names.datum.clone(), datum)];
        self.make_condition(BuiltinClass::MatchError, messages::MATCH_FAILED, slots)
    }

    pub fn stream_error(&self, stream: Value, message: impl Into<String>) -> Condition {
        let slots = vec![(self.names.stream.clone(), stream)];
        self.make_condition(BuiltinClass::StreamError, message, slots)
    }

    pub fn end_of_file(&self, stream: Value) -> Condition {
        let slots = vec![(self.names.stream.clone(), stream)];
        self.make_condition(BuiltinClass::EndOfFile, messages::END_OF_FILE, slots)
    }

    pub fn reader_error(&self, message: impl Into<String>) -> Condition {
        self.make_condition(BuiltinClass::ReaderError, message, Vec::new())
    }

    pub fn prompt_not_found_error(&self, prompt: Value) -> Condition {
        let slots = vec![(self.names.prompt.clone(), prompt)];
        self.make_condition(
            BuiltinClass::PromptNotFoundError,
            messages::PROMPT_NOT_FOUND,
            slots,
        )
    }

    /// Fail with an `assertion-error` unless `ok`.
    pub fn assert(&self, ok: bool) -> Result<()> {
        self.assert_with_message(ok, messages::ASSERTION_FAILED)
    }

    pub fn assert_with_message(&self, ok: bool, message: &str) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(self.assertion_error(message))
        }
    }

    /// Placeholder body for operations subclasses must override.
    pub fn abstract_method<T>(&self) -> Result<T> {
        Err(self.make_condition(BuiltinClass::Error, messages::ABSTRACT_METHOD, Vec::new()))
    }
}
