//! The runtime context.
//!
//! A `Vm` owns the two global mutable tables (symbols and classes) and the
//! root environment. Construction runs the bootstrap in a fixed order:
//! namespace tags, then the built-in class graph, then the root environment.
//! Independent `Vm`s share nothing.

mod bootstrap;
mod data;
mod lists;
mod objects;
mod operators;
mod streams;

use lispx_core::{Namespace, Symbol, SymbolTable};

use crate::config::VmConfig;
use crate::conditions::Result;
use crate::core::class::{BuiltinClass, ClassGraph, ClassId};
use crate::core::env::Environment;
use crate::core::value::Value;
use crate::types::TypeSpec;

/// Symbols the runtime itself needs, interned once at bootstrap.
pub(crate) struct Names {
    pub message: Symbol,
    pub datum: Symbol,
    pub expected_type: Symbol,
    pub symbol: Symbol,
    pub environment: Symbol,
    pub object: Symbol,
    pub slot_name: Symbol,
    pub class: Symbol,
    pub method_name: Symbol,
    pub stream: Symbol,
    pub prompt: Symbol,
    pub value: Symbol,
    pub or: Symbol,
}

impl Names {
    fn intern(symbols: &mut SymbolTable) -> Self {
        let mut v = |name: &str| symbols.intern(name, Namespace::Variable);
        Self {
            message: v("message"),
            datum: v("datum"),
            expected_type: v("expected-type"),
            symbol: v("symbol"),
            environment: v("environment"),
            object: v("object"),
            slot_name: v("slot-name"),
            class: v("class"),
            method_name: v("method-name"),
            stream: v("stream"),
            prompt: v("prompt"),
            value: v("value"),
            or: v("or"),
        }
    }
}

pub struct Vm {
    pub(crate) symbols: SymbolTable,
    pub(crate) classes: ClassGraph,
    pub(crate) root: Environment,
    pub(crate) names: Names,
    pub(crate) config: VmConfig,
}

impl Vm {
    pub fn new() -> Self {
        Self::with_config(VmConfig::default())
    }

    pub fn with_config(config: VmConfig) -> Self {
        bootstrap::boot(config)
    }

    #[inline]
    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    #[inline]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    // ------------------------------------------------------------------
    // Symbols
    // ------------------------------------------------------------------

    pub fn intern_in(&mut self, name: &str, namespace: Namespace) -> Symbol {
        self.symbols.intern(name, namespace)
    }

    /// Intern a runtime string.
    pub fn intern(&mut self, name: &Value, namespace: Namespace) -> Result<Symbol> {
        match name.as_str() {
            Some(s) => Ok(self.symbols.intern(s, namespace)),
            None => Err(self.type_error(name.clone(), &TypeSpec::class(BuiltinClass::String))),
        }
    }

    #[inline]
    pub fn sym(&mut self, name: &str) -> Symbol {
        self.symbols.intern(name, Namespace::Variable)
    }

    #[inline]
    pub fn fsym(&mut self, name: &str) -> Symbol {
        self.symbols.intern(name, Namespace::Function)
    }

    #[inline]
    pub fn csym(&mut self, name: &str) -> Symbol {
        self.symbols.intern(name, Namespace::Class)
    }

    #[inline]
    pub fn kwd(&mut self, name: &str) -> Symbol {
        self.symbols.intern(name, Namespace::Keyword)
    }

    pub fn to_variable_symbol(&mut self, sym: &Symbol) -> Symbol {
        self.symbols.to_variable(sym)
    }

    pub fn to_function_symbol(&mut self, sym: &Symbol) -> Symbol {
        self.symbols.to_function(sym)
    }

    pub fn to_class_symbol(&mut self, sym: &Symbol) -> Symbol {
        self.symbols.to_class(sym)
    }

    pub fn to_keyword_symbol(&mut self, sym: &Symbol) -> Symbol {
        self.symbols.to_keyword(sym)
    }

    /// The name of a symbol as a runtime string.
    pub fn symbol_string(&self, sym: &Symbol) -> Value {
        Value::String(sym.name_rc())
    }

    // ------------------------------------------------------------------
    // Environments
    // ------------------------------------------------------------------

    /// The root environment, holding all built-in bindings.
    #[inline]
    pub fn get_environment(&self) -> &Environment {
        &self.root
    }

    pub fn make_environment(&self, parent: Option<&Environment>) -> Environment {
        Environment::new(parent)
    }

    /// Bind a variable in the root environment.
    pub fn define_constant(&mut self, name: &str, value: Value) {
        let sym = self.sym(name);
        self.root.put(sym, value);
    }

    /// Class registered under `name` in the root environment, if any.
    pub fn find_class(&self, name: &str) -> Option<ClassId> {
        let sym = self.symbols.find(name, Namespace::Class)?;
        self.root.get(&sym)?.as_class()
    }
}
