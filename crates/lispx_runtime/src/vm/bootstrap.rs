use lispx_core::{Namespace, SymbolTable};

use super::{Names, Vm};
use crate::config::VmConfig;
use crate::core::class::{BUILTIN_CLASSES, ClassGraph, ClassRecord, Repr};
use crate::core::env::Environment;
use crate::core::value::Value;

pub(super) fn boot(config: VmConfig) -> Vm {
    // Namespace tags are the `Namespace` enum; the table starts empty.
    let mut symbols = SymbolTable::new();
    let names = Names::intern(&mut symbols);
    tracing::debug!(symbols = symbols.len(), "symbol table ready");

    let mut classes = ClassGraph::new();
    for spec in BUILTIN_CLASSES.iter() {
        let id = classes.add(ClassRecord {
            name: symbols.intern(spec.name, Namespace::Variable),
            superclass: spec.superclass.map(|c| c.id()),
            metaclass: spec.metaclass,
            repr: Repr::BuiltIn(spec.class),
        });
        debug_assert_eq!(id, spec.class.id());
    }
    tracing::debug!(classes = classes.len(), "built-in class graph ready");

    let root = Environment::new(None);
    for spec in BUILTIN_CLASSES.iter() {
        let key = symbols.intern(spec.name, Namespace::Class);
        root.put(key, Value::Class(spec.class.id()));
    }
    tracing::debug!(bindings = root.local_len(), "root environment ready");

    Vm {
        symbols,
        classes,
        root,
        names,
        config,
    }
}
