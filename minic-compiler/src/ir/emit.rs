//! AST → textual IR emission.
//!
//! Lowering walks the expression tree bottom-up, handing out SSA temp
//! numbers in definition order so every `%N` is defined exactly once and
//! before any use. The whole function becomes one `%entry` block ending in
//! a `ret` of the final operand; there is no control flow to thread.

use crate::ast::{CompUnit, Exp, PrimaryExp, ReturnValue, Stmt, UnaryExp, UnaryOp};
use crate::ir::{BasicBlock, Function, Inst, IrType, IrUnaryOp, Operand, Program};

/// Lower a compilation unit to the value-level IR.
pub fn lower_program(unit: &CompUnit) -> Program {
    let mut gen = Gen::new();
    let func = gen.lower_func(unit);
    Program { funcs: vec![func] }
}

/// Lower a compilation unit straight to the canonical textual IR.
pub fn emit_program(unit: &CompUnit) -> String {
    lower_program(unit).to_text()
}

struct Gen {
    insts: Vec<Inst>,
    temp_count: u32,
}

impl Gen {
    fn new() -> Self {
        Self {
            insts: Vec::new(),
            temp_count: 0,
        }
    }

    fn new_temp(&mut self) -> u32 {
        let t = self.temp_count;
        self.temp_count += 1;
        t
    }

    fn lower_func(&mut self, unit: &CompUnit) -> Function {
        let def = &unit.func_def;
        let Stmt::Return(value) = &def.block.stmt;
        let operand = match value {
            ReturnValue::Number(n) => Operand::Const(*n),
            ReturnValue::Exp(exp) => self.lower_exp(exp),
        };
        self.insts.push(Inst::Return(operand));

        Function {
            name: def.ident.clone(),
            ret_type: match def.func_type {
                crate::ast::FuncType::Int => IrType::I32,
            },
            bbs: vec![BasicBlock {
                name: "entry".to_string(),
                insts: std::mem::take(&mut self.insts),
            }],
        }
    }

    fn lower_exp(&mut self, exp: &Exp) -> Operand {
        self.lower_unary(&exp.unary)
    }

    fn lower_unary(&mut self, unary: &UnaryExp) -> Operand {
        match unary {
            UnaryExp::Primary(p) => self.lower_primary(p),
            UnaryExp::Unary { op, operand } => {
                let operand = self.lower_unary(operand);
                match op {
                    // Unary plus is a no-op; forward the operand unchanged.
                    UnaryOp::Plus => operand,
                    UnaryOp::Minus => self.emit_unary(IrUnaryOp::Neg, operand),
                    UnaryOp::Not => self.emit_unary(IrUnaryOp::Not, operand),
                }
            }
        }
    }

    fn lower_primary(&mut self, primary: &PrimaryExp) -> Operand {
        match primary {
            PrimaryExp::Number(n) => Operand::Const(*n),
            PrimaryExp::Paren(exp) => self.lower_exp(exp),
        }
    }

    fn emit_unary(&mut self, op: IrUnaryOp, operand: Operand) -> Operand {
        let dest = self.new_temp();
        self.insts.push(Inst::Unary { dest, op, operand });
        Operand::Temp(dest)
    }
}
