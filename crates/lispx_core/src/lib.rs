//! Core types for the Lispx runtime.
//!
//! This crate contains the leaf types that do not depend on the class graph:
//! - `Symbol` / `SymbolTable` - Interned, namespace-qualified identifiers
//! - `Decimal` - Arbitrary-precision decimal numbers
//! - `FastHashMap` - The hash map flavour shared by all runtime tables

pub mod map;
pub mod number;
pub mod symbol;

pub use map::{FastHashMap, fast_hasher, fast_map_new};
pub use number::{Decimal, ParseNumberError};
pub use symbol::{Namespace, Symbol, SymbolTable};
