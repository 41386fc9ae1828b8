//! Core runtime data structures.
//!
//! - `value` - The runtime value representation
//! - `class` - Class records, built-in class table and the class arena
//! - `object` - Standard objects and their slot tables
//! - `env` - Chained environments
//! - `stream` - In-memory string streams

pub mod class;
pub mod env;
pub mod object;
pub mod stream;
pub mod value;

pub use value::Value;
