//! Classes, instances and slots.

use lispx_core::{Namespace, Symbol};

use super::Vm;
use crate::conditions::Result;
use crate::core::class::{BuiltinClass, ClassId, ClassRecord, Metaclass, Repr};
use crate::core::object::StandardObject;
use crate::core::value::Value;
use crate::errors::messages;
use crate::types::TypeSpec;

impl Vm {
    // ------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------

    /// The class of any value. Total.
    pub fn class_of(&self, value: &Value) -> ClassId {
        match value {
            Value::Object(obj) => self.classes.resolve(obj.class()),
            Value::Class(id) => self.classes.get(*id).metaclass.class_id(),
            other => other
                .builtin_class()
                .unwrap_or(BuiltinClass::Object)
                .id(),
        }
    }

    #[inline]
    pub fn lisp_class(&self, class: BuiltinClass) -> ClassId {
        class.id()
    }

    #[inline]
    pub fn is_subclass(&self, sub: ClassId, sup: ClassId) -> bool {
        self.classes.is_subclass(sub, sup)
    }

    pub fn class_record(&self, class: ClassId) -> &ClassRecord {
        self.classes.get(class)
    }

    /// Name symbol, in the variable namespace.
    pub fn class_name(&self, class: ClassId) -> &Symbol {
        &self.classes.get(class).name
    }

    /// `None` only for `object`.
    pub fn class_superclass(&self, class: ClassId) -> Option<ClassId> {
        self.classes.get(class).superclass
    }

    pub fn class_metaclass(&self, class: ClassId) -> ClassId {
        self.classes.get(class).metaclass.class_id()
    }

    pub fn class_repr(&self, class: ClassId) -> Repr {
        self.classes.get(class).repr
    }

    // ------------------------------------------------------------------
    // Dynamic classes
    // ------------------------------------------------------------------

    /// Create a standard class and register it under `name` in the class
    /// namespace of the root environment.
    ///
    /// `superclass` may be any class metaobject, built-in or standard.
    /// Re-registering a name rebinds it; the previous class, its instances and
    /// subclasses are left as they are.
    pub fn make_standard_class(&mut self, name: &Symbol, superclass: &Value) -> Result<ClassId> {
        let superclass = self
            .assert_type(superclass.clone(), &TypeSpec::class(BuiltinClass::Class))?
            .as_class()
            .unwrap_or(BuiltinClass::Object.id());

        let name = self.symbols.to_variable(name);
        let key = self.symbols.to_class(&name);
        if let Some(previous) = self.root.get_local(&key).and_then(|v| v.as_class()) {
            tracing::debug!(class = %name, previous = previous.0, "redefining class");
        }

        let repr = self.classes.fresh_repr();
        let id = self.classes.add(ClassRecord {
            name: name.clone(),
            superclass: Some(superclass),
            metaclass: Metaclass::Standard,
            repr,
        });
        self.root.put(key, Value::Class(id));
        tracing::debug!(
            class = %name,
            superclass = %self.class_name(superclass),
            id = id.0,
            "created standard class"
        );
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Instances
    // ------------------------------------------------------------------

    /// Instantiate a standard class. `initargs` alternates slot names
    /// (variable or keyword symbols) and values.
    pub fn make_instance(&mut self, class: ClassId, initargs: &[Value]) -> Result<Value> {
        self.assert_type(
            Value::Class(class),
            &TypeSpec::class(BuiltinClass::StandardClass),
        )?;
        if initargs.len() % 2 != 0 && self.config.strict_initargs {
            return Err(self.assertion_error(messages::ODD_INITARGS));
        }

        let obj = StandardObject::new(class);
        for pair in initargs.chunks(2) {
            let key = self.slot_key_arg(&pair[0])?;
            let key = self.slot_key_for_write(&key);
            let value = pair.get(1).cloned().unwrap_or(Value::UNDEFINED);
            obj.set(key, value);
        }
        Ok(Value::Object(obj))
    }

    fn slot_key_arg(&self, key: &Value) -> Result<Symbol> {
        match key {
            Value::Symbol(sym) => Ok(sym.clone()),
            other => Err(self.type_error(other.clone(), &TypeSpec::class(BuiltinClass::Symbol))),
        }
    }

    /// Keyword keys alias the variable symbol of the same name.
    fn slot_key_for_write(&mut self, key: &Symbol) -> Symbol {
        if key.is_keyword() {
            self.symbols.to_variable(key)
        } else {
            key.clone()
        }
    }

    /// Read-side alias lookup; a never-interned variable name cannot be bound.
    fn slot_key_for_read(&self, key: &Symbol) -> Option<Symbol> {
        if key.is_keyword() {
            self.symbols.find(key.name(), Namespace::Variable)
        } else {
            Some(key.clone())
        }
    }

    fn standard_object<'a>(&self, obj: &'a Value) -> Result<&'a StandardObject> {
        obj.as_object().ok_or_else(|| {
            self.type_error(obj.clone(), &TypeSpec::class(BuiltinClass::StandardObject))
        })
    }

    /// Fails with an `unbound-slot-error` if the slot was never set.
    pub fn slot_value(&self, obj: &Value, key: &Symbol) -> Result<Value> {
        let object = self.standard_object(obj)?;
        self.slot_key_for_read(key)
            .and_then(|k| object.get(&k))
            .ok_or_else(|| self.unbound_slot_error(obj, key))
    }

    /// Create or overwrite a slot.
    pub fn set_slot_value(&mut self, obj: &Value, key: &Symbol, value: Value) -> Result<()> {
        let object = self.standard_object(obj)?.clone();
        let key = self.slot_key_for_write(key);
        object.set(key, value);
        Ok(())
    }

    /// Never fails; false for values that are not standard objects.
    pub fn is_slot_bound(&self, obj: &Value, key: &Symbol) -> bool {
        match (obj.as_object(), self.slot_key_for_read(key)) {
            (Some(object), Some(k)) => object.is_bound(&k),
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Dynamic variables
    // ------------------------------------------------------------------

    pub fn make_dynamic(&self, value: Value) -> Value {
        let obj = StandardObject::new(BuiltinClass::Dynamic.id());
        obj.set(self.names.value.clone(), value);
        Value::Object(obj)
    }

    pub fn dynamic_value(&self, dynamic: &Value) -> Result<Value> {
        let dynamic = self.assert_type(dynamic.clone(), &TypeSpec::class(BuiltinClass::Dynamic))?;
        let key = self.names.value.clone();
        self.slot_value(&dynamic, &key)
    }

    pub fn set_dynamic_value(&mut self, dynamic: &Value, value: Value) -> Result<()> {
        let dynamic = self.assert_type(dynamic.clone(), &TypeSpec::class(BuiltinClass::Dynamic))?;
        let key = self.names.value.clone();
        self.set_slot_value(&dynamic, &key, value)
    }
}
