//! 64-bit integer semantics of the binary operators.
//!
//! All arithmetic wraps on overflow. Shift amounts are taken modulo 64 and
//! `>>` is a logical shift. Division truncates toward zero, and
//! `i64::MIN / -1` wraps to `i64::MIN`.

use indie_types::ast::BinaryOperator;

/// Apply `op`. Returns `None` only for a zero divisor.
pub fn apply(op: BinaryOperator, lhs: i64, rhs: i64) -> Option<i64> {
    let value = match op {
        BinaryOperator::Add => lhs.wrapping_add(rhs),
        BinaryOperator::Subtract => lhs.wrapping_sub(rhs),
        BinaryOperator::Multiply => lhs.wrapping_mul(rhs),
        BinaryOperator::Divide => {
            if rhs == 0 {
                return None;
            }
            lhs.wrapping_div(rhs)
        }
        BinaryOperator::Mod => {
            if rhs == 0 {
                return None;
            }
            lhs.wrapping_rem(rhs)
        }
        BinaryOperator::ShiftLeft => lhs.wrapping_shl(shift_amount(rhs)),
        BinaryOperator::ShiftRight => (lhs as u64).wrapping_shr(shift_amount(rhs)) as i64,
        BinaryOperator::BitAnd => lhs & rhs,
        BinaryOperator::BitOr => lhs | rhs,
        BinaryOperator::BitXor => lhs ^ rhs,
    };
    Some(value)
}

/// Whether `op` overflows and wraps for these operands.
pub fn wraps(op: BinaryOperator, lhs: i64, rhs: i64) -> bool {
    match op {
        BinaryOperator::Add => lhs.checked_add(rhs).is_none(),
        BinaryOperator::Subtract => lhs.checked_sub(rhs).is_none(),
        BinaryOperator::Multiply => lhs.checked_mul(rhs).is_none(),
        BinaryOperator::Divide => lhs == i64::MIN && rhs == -1,
        _ => false,
    }
}

/// Whether a shift by `amount` is used as written, without reduction modulo 64.
pub fn shift_in_range(amount: i64) -> bool {
    (0..64).contains(&amount)
}

fn shift_amount(rhs: i64) -> u32 {
    (rhs & 63) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use BinaryOperator::*;

    #[test]
    fn test_wrapping_arithmetic() {
        assert_eq!(apply(Add, i64::MAX, 1), Some(i64::MIN));
        assert_eq!(apply(Subtract, i64::MIN, 1), Some(i64::MAX));
        assert_eq!(apply(Multiply, i64::MAX, 2), Some(-2));
        assert!(wraps(Add, i64::MAX, 1));
        assert!(!wraps(Add, 1, 2));
    }

    #[test]
    fn test_division() {
        assert_eq!(apply(Divide, 7, 2), Some(3));
        assert_eq!(apply(Divide, -7, 2), Some(-3));
        assert_eq!(apply(Mod, -7, 2), Some(-1));
        assert_eq!(apply(Divide, i64::MIN, -1), Some(i64::MIN));
        assert_eq!(apply(Mod, i64::MIN, -1), Some(0));
        assert!(wraps(Divide, i64::MIN, -1));
        assert_eq!(apply(Divide, 7, 0), None);
        assert_eq!(apply(Mod, 7, 0), None);
    }

    #[test]
    fn test_shifts_are_modulo_64() {
        assert_eq!(apply(ShiftLeft, 1, 3), Some(8));
        assert_eq!(apply(ShiftLeft, 1, 64), Some(1));
        assert_eq!(apply(ShiftLeft, 1, 65), Some(2));
        assert_eq!(apply(ShiftLeft, 1, -1), Some(i64::MIN));
        assert_eq!(apply(ShiftRight, -1, 60), Some(15));
        assert_eq!(apply(ShiftRight, i64::MIN, 63), Some(1));
        assert!(shift_in_range(63));
        assert!(!shift_in_range(64));
        assert!(!shift_in_range(-1));
    }

    #[test]
    fn test_bitwise() {
        assert_eq!(apply(BitAnd, 0b1100, 0b1010), Some(0b1000));
        assert_eq!(apply(BitOr, 0b1100, 0b1010), Some(0b1110));
        assert_eq!(apply(BitXor, 0b1100, 0b1010), Some(0b0110));
    }
}
