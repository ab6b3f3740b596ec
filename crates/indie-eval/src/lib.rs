//! indie tree-walking evaluator: reference implementation.
//!
//! Evaluates modules directly from the AST without compiling them. Used by
//! the checker to fold constants and as the golden reference for the
//! output of compiled IR.

pub mod arith;
pub mod error;
pub mod evaluator;

pub use error::{EvalError, EvalResult};
pub use evaluator::{render_output, run, Evaluator};
