//! Expression parsing with full operator precedence.
//!
//! Precedence (lowest → highest), all left associative:
//! 6. `|`
//! 5. `^`
//! 4. `&`
//! 3. `<<`, `>>`
//! 2. `+`, `-`
//! 1. `*`, `/`, `%`
//! 0. integer literal, `( expr )`

use indie_lexer::token::TokenKind;
use indie_types::ast::*;

use crate::parser::{Parser, MAX_NESTING};

type Operand<'a> = fn(&mut Parser<'a>) -> Option<Expression>;

impl<'a> Parser<'a> {
    // ══════════════════════════════════════════════════════════════════════════
    // Entry Point
    // ══════════════════════════════════════════════════════════════════════════

    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> Option<Expression> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            self.error_at_current(format!(
                "maximum expression nesting depth is {MAX_NESTING}"
            ));
            self.depth -= 1;
            return None;
        }
        let result = self.parse_bit_or();
        self.depth -= 1;
        result
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Precedence Chain
    // ══════════════════════════════════════════════════════════════════════════

    /// `BitOr = BitXor { "|" BitXor }`
    fn parse_bit_or(&mut self) -> Option<Expression> {
        self.parse_left_assoc(Self::parse_bit_xor, |kind| match kind {
            TokenKind::Pipe => Some(BinaryOperator::BitOr),
            _ => None,
        })
    }

    /// `BitXor = BitAnd { "^" BitAnd }`
    fn parse_bit_xor(&mut self) -> Option<Expression> {
        self.parse_left_assoc(Self::parse_bit_and, |kind| match kind {
            TokenKind::Caret => Some(BinaryOperator::BitXor),
            _ => None,
        })
    }

    /// `BitAnd = Shift { "&" Shift }`
    fn parse_bit_and(&mut self) -> Option<Expression> {
        self.parse_left_assoc(Self::parse_shift, |kind| match kind {
            TokenKind::Ampersand => Some(BinaryOperator::BitAnd),
            _ => None,
        })
    }

    /// `Shift = Add { ("<<" | ">>") Add }`
    fn parse_shift(&mut self) -> Option<Expression> {
        self.parse_left_assoc(Self::parse_add, |kind| match kind {
            TokenKind::ShiftLeft => Some(BinaryOperator::ShiftLeft),
            TokenKind::ShiftRight => Some(BinaryOperator::ShiftRight),
            _ => None,
        })
    }

    /// `Add = Mul { ("+" | "-") Mul }`
    fn parse_add(&mut self) -> Option<Expression> {
        self.parse_left_assoc(Self::parse_mul, |kind| match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Minus => Some(BinaryOperator::Subtract),
            _ => None,
        })
    }

    /// `Mul = Primary { ("*" | "/" | "%") Primary }`
    fn parse_mul(&mut self) -> Option<Expression> {
        self.parse_left_assoc(Self::parse_primary, |kind| match kind {
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            TokenKind::Percent => Some(BinaryOperator::Mod),
            _ => None,
        })
    }

    /// One precedence level: `operand { op operand }`, folded to the left.
    ///
    /// Each Binary's location is the merge of its operands' locations. A tree
    /// deeper than [`MAX_NESTING`] is rejected at the operator that exceeds it.
    fn parse_left_assoc(
        &mut self,
        operand: Operand<'a>,
        operator: fn(TokenKind) -> Option<BinaryOperator>,
    ) -> Option<Expression> {
        let mut left = operand(self)?;
        while let Some(op) = operator(self.peek_kind()) {
            let op_location = self.advance()?.location;
            let right = operand(self)?;
            let location = left.location().merge(right.location());
            left = Binary::new(location, left, op, right).into();
            if left.depth() > MAX_NESTING {
                self.error_at(
                    &op_location,
                    format!("maximum expression nesting depth is {MAX_NESTING}"),
                );
                return None;
            }
        }
        Some(left)
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Primary Expressions
    // ══════════════════════════════════════════════════════════════════════════

    /// `Primary = Integer | "(" Expression ")"`
    fn parse_primary(&mut self) -> Option<Expression> {
        match self.peek_kind() {
            TokenKind::Integer(value) => {
                let token = self.advance()?;
                Some(IntegerLiteral::new(token.location, value).into())
            }
            TokenKind::LParen => {
                let open = self.advance()?;
                let inner = self.parse_expression()?;
                let close = self.expect(TokenKind::RParen)?;
                let location = open.location.merge(&close.location);
                Some(inner.with_location(location))
            }
            kind => {
                self.error_at_current(format!("expected expression, got '{kind}'"));
                None
            }
        }
    }
}
