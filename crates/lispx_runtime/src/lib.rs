//! Lispx runtime object model.
//!
//! Everything the evaluator, reader and printer are built against:
//! - `Value` - Closed union of host values and runtime values
//! - Class graph - Built-in and dynamically created classes with metaclasses
//! - `StandardObject` - Instances with a slot table
//! - `Environment` - Chained mutable bindings keyed by interned symbols
//! - `TypeSpec` - Structural type predicates and assertions
//! - `Condition` - Structured errors as standard objects
//!
//! All global tables live in a `Vm`, which must be constructed before any
//! other operation.

#![allow(clippy::new_without_default)]
#![allow(clippy::should_implement_trait)]

pub mod config;
pub mod core;
pub mod errors;
mod conditions;
mod types;
mod vm;

pub use lispx_core::{Decimal, Namespace, ParseNumberError, Symbol, SymbolTable};

// Re-exports from core/
pub use core::class::{BuiltinClass, ClassId, ClassRecord, Metaclass, Repr};
pub use core::env::Environment;
pub use core::object::StandardObject;
pub use core::stream::{StringInputStream, StringOutputStream};
pub use core::value::{BuiltinFn, Cons, Fexpr, HostFn, HostValue, Operator, Value, equal};

pub use conditions::{Condition, Result};
pub use config::VmConfig;
pub use types::{TypeSpec, type_or};
pub use vm::Vm;
