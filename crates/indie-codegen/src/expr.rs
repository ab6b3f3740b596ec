//! Expression lowering.
//!
//! Every expression evaluates to one `i64` on the operand stack. Operands
//! are lowered left before right.

use indie_types::ast::*;
use wasm_encoder::{BlockType, Function, Instruction, ValType};

use crate::error::{CodegenError, CodegenResult};
use crate::types::{LOCAL_LHS, LOCAL_RHS};

/// Emits the instructions of one expression into a function body.
pub struct ExprEmitter<'f> {
    function: &'f mut Function,
}

impl<'f> ExprEmitter<'f> {
    pub fn new(function: &'f mut Function) -> Self {
        Self { function }
    }

    fn emit(&mut self, instruction: Instruction<'_>) {
        self.function.instruction(&instruction);
    }

    /// `lhs rhs → lhs / rhs`, with `i64::MIN / -1` wrapping instead of trapping.
    ///
    /// A zero divisor still traps.
    fn emit_signed_division(&mut self) {
        self.emit(Instruction::LocalSet(LOCAL_RHS));
        self.emit(Instruction::LocalSet(LOCAL_LHS));
        self.emit(Instruction::LocalGet(LOCAL_RHS));
        self.emit(Instruction::I64Const(-1));
        self.emit(Instruction::I64Eq);
        self.emit(Instruction::If(BlockType::Result(ValType::I64)));
        self.emit(Instruction::I64Const(0));
        self.emit(Instruction::LocalGet(LOCAL_LHS));
        self.emit(Instruction::I64Sub);
        self.emit(Instruction::Else);
        self.emit(Instruction::LocalGet(LOCAL_LHS));
        self.emit(Instruction::LocalGet(LOCAL_RHS));
        self.emit(Instruction::I64DivS);
        self.emit(Instruction::End);
    }
}

impl Handler for ExprEmitter<'_> {
    type Output = CodegenResult<()>;

    fn handle_binary(&mut self, binary: &Binary) -> CodegenResult<()> {
        if binary.operator.is_division() {
            if let Expression::IntegerLiteral(IntegerLiteral { value: 0, .. }) = binary.rhs.as_ref() {
                return Err(CodegenError::DivisionByZero {
                    operator: binary.operator,
                    location: binary.location.clone(),
                });
            }
        }

        binary.lhs.handle(self)?;
        binary.rhs.handle(self)?;

        // Shift instructions take the amount modulo 64 natively.
        match binary.operator {
            BinaryOperator::Add => self.emit(Instruction::I64Add),
            BinaryOperator::Subtract => self.emit(Instruction::I64Sub),
            BinaryOperator::Multiply => self.emit(Instruction::I64Mul),
            BinaryOperator::Divide => self.emit_signed_division(),
            BinaryOperator::Mod => self.emit(Instruction::I64RemS),
            BinaryOperator::ShiftLeft => self.emit(Instruction::I64Shl),
            BinaryOperator::ShiftRight => self.emit(Instruction::I64ShrU),
            BinaryOperator::BitAnd => self.emit(Instruction::I64And),
            BinaryOperator::BitOr => self.emit(Instruction::I64Or),
            BinaryOperator::BitXor => self.emit(Instruction::I64Xor),
        }
        Ok(())
    }

    fn handle_integer_literal(&mut self, literal: &IntegerLiteral) -> CodegenResult<()> {
        self.emit(Instruction::I64Const(literal.value));
        Ok(())
    }
}
