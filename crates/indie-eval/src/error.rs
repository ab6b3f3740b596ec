//! Runtime error types for the indie evaluator.

use indie_types::Location;
use thiserror::Error;

/// Evaluation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// `a / 0`
    #[error("division by zero at {location}")]
    DivisionByZero { location: Location },
    /// `a % 0`
    #[error("modulo by zero at {location}")]
    ModuloByZero { location: Location },
}

impl EvalError {
    pub fn location(&self) -> &Location {
        match self {
            EvalError::DivisionByZero { location } | EvalError::ModuloByZero { location } => {
                location
            }
        }
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
