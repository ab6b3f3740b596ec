//! AST node types for the indie language.
//!
//! Every node carries a [`Location`] for diagnostics. Nodes are built once
//! by the parser and never mutated. Consumers walk expressions through the
//! [`Handler`] trait.

use crate::location::{File, Location, Position};
use std::fmt;
use std::sync::Arc;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A parsed source file: its top-level expressions in source order.
///
/// Each top-level expression produces one line of program output.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub file: Arc<File>,
    pub expressions: Vec<Expression>,
}

impl Module {
    pub fn new(file: Arc<File>) -> Self {
        Self {
            file,
            expressions: Vec::new(),
        }
    }

    pub fn push(&mut self, expression: Expression) {
        self.expressions.push(expression);
    }

    /// The span covering every expression, or the start of the file if empty.
    pub fn location(&self) -> Location {
        match self.expressions.split_first() {
            Some((first, rest)) => rest
                .iter()
                .fold(first.location().clone(), |acc, e| acc.merge(e.location())),
            None => Location::new(self.file.clone(), Position::default(), Position::default()),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `lhs <op> rhs`
    Binary(Binary),
    /// `42`
    IntegerLiteral(IntegerLiteral),
}

impl Expression {
    pub fn location(&self) -> &Location {
        match self {
            Expression::Binary(binary) => &binary.location,
            Expression::IntegerLiteral(literal) => &literal.location,
        }
    }

    /// Replace this node's location, e.g. to cover enclosing parentheses.
    pub fn with_location(mut self, location: Location) -> Self {
        match &mut self {
            Expression::Binary(binary) => binary.location = location,
            Expression::IntegerLiteral(literal) => literal.location = location,
        }
        self
    }

    /// Height of this expression tree; a literal has depth 1.
    pub fn depth(&self) -> u32 {
        match self {
            Expression::Binary(binary) => binary.depth,
            Expression::IntegerLiteral(_) => 1,
        }
    }

    /// Dispatch to the handler method for this variant.
    pub fn handle<H: Handler + ?Sized>(&self, handler: &mut H) -> H::Output {
        match self {
            Expression::Binary(binary) => handler.handle_binary(binary),
            Expression::IntegerLiteral(literal) => handler.handle_integer_literal(literal),
        }
    }
}

impl From<Binary> for Expression {
    fn from(binary: Binary) -> Self {
        Expression::Binary(binary)
    }
}

impl From<IntegerLiteral> for Expression {
    fn from(literal: IntegerLiteral) -> Self {
        Expression::IntegerLiteral(literal)
    }
}

/// One operation per variant of [`Expression`].
///
/// Adding a variant adds a method here, so every consumer must handle it.
pub trait Handler {
    type Output;

    fn handle_binary(&mut self, binary: &Binary) -> Self::Output;
    fn handle_integer_literal(&mut self, literal: &IntegerLiteral) -> Self::Output;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub location: Location,
    pub lhs: Box<Expression>,
    pub operator: BinaryOperator,
    pub rhs: Box<Expression>,
    depth: u32,
}

impl Binary {
    pub fn new(location: Location, lhs: Expression, operator: BinaryOperator, rhs: Expression) -> Self {
        Self {
            depth: lhs.depth().max(rhs.depth()).saturating_add(1),
            location,
            lhs: Box::new(lhs),
            operator,
            rhs: Box::new(rhs),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub location: Location,
    pub value: i64,
}

impl IntegerLiteral {
    pub fn new(location: Location, value: i64) -> Self {
        Self { location, value }
    }
}

/// Binary operators. All operate on 64-bit integers with wrapping semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Divide,
    Multiply,
    Mod,
    ShiftLeft,
    ShiftRight,
    BitAnd,
    BitOr,
    BitXor,
}

impl BinaryOperator {
    /// Returns the operator symbol for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Divide => "/",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Mod => "%",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
        }
    }

    /// Whether a zero right operand is an error.
    pub fn is_division(&self) -> bool {
        matches!(self, BinaryOperator::Divide | BinaryOperator::Mod)
    }

    pub fn is_shift(&self) -> bool {
        matches!(self, BinaryOperator::ShiftLeft | BinaryOperator::ShiftRight)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
