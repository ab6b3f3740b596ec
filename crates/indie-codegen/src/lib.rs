//! indie IR lowering: compiles a checked AST to a `.wasm` binary.
//!
//! # Architecture
//!
//! The code generator takes a checked [`indie_types::ast::Module`] and
//! produces a self-contained, validated WebAssembly module that a backend
//! (an engine, an ahead-of-time compiler) turns into machine code.
//!
//! ## Imports
//! - `env.printf(format_ptr, varargs_ptr) → i32`
//!
//! ## Exports
//! - `main() → i32`: prints each top-level expression, returns 0
//! - `memory`: linear memory
//!
//! ## Value Representation
//!
//! Every expression is an `i64`. Arithmetic wraps, `>>` is logical, shift
//! amounts are taken modulo 64, and `i64::MIN / -1` wraps to `i64::MIN`.
//! A zero divisor traps, and a literal zero divisor is rejected.

pub mod compiler;
pub mod error;
pub mod expr;
pub mod source_map;
pub mod types;

pub use compiler::{compile, IrUnit};
pub use error::{CodegenError, CodegenResult};
pub use source_map::{SourceMap, SourceMapEntry};
