//! Codegen error types.

use indie_types::ast::BinaryOperator;
use indie_types::Location;
use thiserror::Error;

/// Errors that can occur during lowering.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// `/` or `%` with a literal zero divisor.
    #[error("'{operator}' by a literal zero at {location}")]
    DivisionByZero {
        operator: BinaryOperator,
        location: Location,
    },

    /// The generated WASM module failed validation.
    #[error("WASM validation failed: {0}")]
    ValidationFailed(String),
}

/// Codegen result type alias.
pub type CodegenResult<T> = Result<T, CodegenError>;
