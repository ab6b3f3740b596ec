//! Semantic checker: folds each top-level expression and validates it.
//!
//! Entry point: [`check`].
//!
//! Diagnostics emitted:
//! - ERROR: division or modulo by zero
//! - WARNING: shift amount outside `0..=63`
//! - WARNING: arithmetic overflow that wraps

use indie_eval::arith;
use indie_types::ast::*;
use indie_types::{Level, Location, Reporter};

// ══════════════════════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════════════════════

/// What the checker learned about a module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Symbols {
    values: Vec<i64>,
}

impl Symbols {
    /// Folded value of every top-level expression, in source order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn get(&self, expression: usize) -> Option<i64> {
        self.values.get(expression).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Check a parsed [`Module`] without modifying it.
///
/// Returns `None` iff at least one ERROR was reported by this call.
#[tracing::instrument(skip_all, fields(path = %module.file.path().display()))]
pub fn check(reporter: &Reporter, module: &Module) -> Option<Symbols> {
    let mut checker = Checker::new(reporter);
    let values: Vec<Option<i64>> = module
        .expressions
        .iter()
        .map(|expression| expression.handle(&mut checker))
        .collect();

    tracing::debug!(
        errors = checker.errors,
        warnings = checker.warnings,
        "checked"
    );
    if checker.errors > 0 {
        return None;
    }
    let values = values.into_iter().collect::<Option<Vec<_>>>()?;
    Some(Symbols { values })
}

// ══════════════════════════════════════════════════════════════════════════════
// Checker
// ══════════════════════════════════════════════════════════════════════════════

/// Constant-folds expressions, reporting as it goes.
///
/// A subexpression that fails to fold yields `None`; only the failing
/// operation itself is reported.
struct Checker<'a> {
    reporter: &'a Reporter,
    errors: usize,
    warnings: usize,
}

impl<'a> Checker<'a> {
    fn new(reporter: &'a Reporter) -> Self {
        Self {
            reporter,
            errors: 0,
            warnings: 0,
        }
    }

    fn error(&mut self, location: &Location, message: impl Into<String>) {
        self.errors += 1;
        self.reporter.report_at(Level::Error, location, message);
    }

    fn warning(&mut self, location: &Location, message: impl Into<String>) {
        self.warnings += 1;
        self.reporter.report_at(Level::Warning, location, message);
    }
}

impl Handler for Checker<'_> {
    type Output = Option<i64>;

    fn handle_binary(&mut self, binary: &Binary) -> Option<i64> {
        // Both sides first, so independent problems are all reported.
        let lhs = binary.lhs.handle(self);
        let rhs = binary.rhs.handle(self);
        let (lhs, rhs) = (lhs?, rhs?);
        let op = binary.operator;

        if op.is_shift() && !arith::shift_in_range(rhs) {
            self.warning(
                &binary.location,
                format!(
                    "shift amount {rhs} is outside 0..=63 and is taken modulo 64 ({})",
                    rhs & 63
                ),
            );
        }

        match arith::apply(op, lhs, rhs) {
            Some(value) => {
                if arith::wraps(op, lhs, rhs) {
                    self.warning(
                        &binary.location,
                        format!("'{lhs} {op} {rhs}' overflows and wraps to {value}"),
                    );
                }
                Some(value)
            }
            None => {
                let message = match op {
                    BinaryOperator::Mod => "modulo by zero",
                    _ => "division by zero",
                };
                self.error(&binary.location, message);
                None
            }
        }
    }

    fn handle_integer_literal(&mut self, literal: &IntegerLiteral) -> Option<i64> {
        Some(literal.value)
    }
}
