//! Core expression evaluator.

use crate::arith;
use crate::error::{EvalError, EvalResult};
use indie_types::ast::*;

/// Walks expressions and produces their values.
#[derive(Debug, Default)]
pub struct Evaluator {
    /// Number of nodes evaluated so far.
    pub steps: u64,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate an expression to its value.
    pub fn evaluate(&mut self, expression: &Expression) -> EvalResult<i64> {
        expression.handle(self)
    }
}

impl Handler for Evaluator {
    type Output = EvalResult<i64>;

    fn handle_binary(&mut self, binary: &Binary) -> EvalResult<i64> {
        self.steps += 1;
        let lhs = binary.lhs.handle(self)?;
        let rhs = binary.rhs.handle(self)?;
        arith::apply(binary.operator, lhs, rhs).ok_or_else(|| {
            let location = binary.location.clone();
            match binary.operator {
                BinaryOperator::Mod => EvalError::ModuloByZero { location },
                _ => EvalError::DivisionByZero { location },
            }
        })
    }

    fn handle_integer_literal(&mut self, literal: &IntegerLiteral) -> EvalResult<i64> {
        self.steps += 1;
        Ok(literal.value)
    }
}

/// Evaluate every top-level expression. The result is the program's output,
/// one value per expression in source order.
pub fn run(module: &Module) -> EvalResult<Vec<i64>> {
    let mut evaluator = Evaluator::new();
    module
        .expressions
        .iter()
        .map(|expression| evaluator.evaluate(expression))
        .collect()
}

/// Format values the way the compiled program prints them: one per line.
pub fn render_output(values: &[i64]) -> String {
    values.iter().map(|value| format!("{value}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indie_types::{File, Location};

    fn literal(value: i64) -> Expression {
        let file = File::in_memory("t.indie", "");
        IntegerLiteral::new(Location::point(file, 1, 1), value).into()
    }

    fn binary(lhs: Expression, operator: BinaryOperator, rhs: Expression) -> Expression {
        let location = lhs.location().merge(rhs.location());
        Binary::new(location, lhs, operator, rhs).into()
    }

    #[test]
    fn test_evaluates_nested() {
        let e = binary(
            literal(2),
            BinaryOperator::Add,
            binary(literal(3), BinaryOperator::Multiply, literal(4)),
        );
        let mut evaluator = Evaluator::new();
        assert_eq!(evaluator.evaluate(&e), Ok(14));
        assert_eq!(evaluator.steps, 5);
    }

    #[test]
    fn test_division_by_zero_is_located() {
        let e = binary(literal(7), BinaryOperator::Divide, literal(0));
        let err = Evaluator::new().evaluate(&e).unwrap_err();
        assert!(matches!(err, EvalError::DivisionByZero { .. }));
        assert_eq!(err.location(), e.location());

        let e = binary(literal(7), BinaryOperator::Mod, literal(0));
        assert!(matches!(
            Evaluator::new().evaluate(&e),
            Err(EvalError::ModuloByZero { .. })
        ));
    }

    #[test]
    fn test_render_output() {
        assert_eq!(render_output(&[42, -1]), "42\n-1\n");
        assert_eq!(render_output(&[]), "");
    }
}
