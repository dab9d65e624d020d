//! The code-generation visitor.
//!
//! A pre-order depth-first walk over the raw program: program → functions →
//! basic blocks → values, with one visit method per level and an exhaustive
//! match on the value kind. SSA temps are pinned to the scratch registers
//! `t0`–`t6` in definition order; the supported program shape has no
//! control flow, so no block labels or branches are emitted and every temp
//! stays live until the final `ret`.

use std::collections::HashMap;
use std::fmt::Write;

use crate::ir::raw::{RawBasicBlock, RawFunction, RawProgram, RawValue, ValueId};
use crate::ir::IrUnaryOp;
use crate::CompileError;

/// Scratch registers handed to SSA temps, in allocation order. Spilling is
/// out of scope; running out is a fatal internal error.
const TEMP_REGS: [&str; 7] = ["t0", "t1", "t2", "t3", "t4", "t5", "t6"];

pub struct Codegen<'a> {
    raw: &'a RawProgram,
    out: String,
    /// Register assigned to each instruction that produces a value.
    regs: HashMap<ValueId, &'static str>,
    next_reg: usize,
}

impl<'a> Codegen<'a> {
    pub fn new(raw: &'a RawProgram) -> Self {
        Self {
            raw,
            out: String::new(),
            regs: HashMap::new(),
            next_reg: 0,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn emit(&mut self, line: impl AsRef<str>) {
        let _ = writeln!(self.out, "{}", line.as_ref());
    }

    /// Visit the program: directives first, then globals, then functions.
    pub fn emit_program(&mut self) -> Result<(), CompileError> {
        let raw = self.raw;
        self.emit("  .text");
        for &id in &raw.globals {
            self.visit_global(id)?;
        }
        for func in &raw.funcs {
            self.emit(format!("  .global {}", func.name));
            self.visit_func(func)?;
        }
        Ok(())
    }

    fn visit_global(&mut self, id: ValueId) -> Result<(), CompileError> {
        // The builder never emits globals today; one showing up means the
        // builder and this visitor have diverged.
        Err(CompileError::Internal(format!(
            "unsupported global value {:?}",
            self.raw.value(id)
        )))
    }

    fn visit_func(&mut self, func: &RawFunction) -> Result<(), CompileError> {
        self.emit(format!("{}:", func.name));
        for bb in &func.bbs {
            self.visit_bb(bb)?;
        }
        Ok(())
    }

    /// A basic block is just its instructions in program order; with a
    /// single entry block and no branches there is nothing to label.
    fn visit_bb(&mut self, bb: &RawBasicBlock) -> Result<(), CompileError> {
        for &id in &bb.insts {
            self.visit_inst(id)?;
        }
        Ok(())
    }

    fn visit_inst(&mut self, id: ValueId) -> Result<(), CompileError> {
        match *self.raw.value(id) {
            RawValue::Unary { op, operand } => {
                let dest = self.alloc_reg(id)?;
                let src = self.materialize(operand, dest)?;
                match op {
                    IrUnaryOp::Neg => self.emit(format!("  neg {dest}, {src}")),
                    IrUnaryOp::Not => self.emit(format!("  seqz {dest}, {src}")),
                }
                Ok(())
            }
            RawValue::Return(value) => {
                if let Some(v) = value {
                    match *self.raw.value(v) {
                        RawValue::Integer(n) => self.emit(format!("  li a0, {n}")),
                        _ => {
                            let src = self.reg_of(v)?;
                            self.emit(format!("  mv a0, {src}"));
                        }
                    }
                }
                self.emit("  ret");
                Ok(())
            }
            RawValue::Integer(n) => Err(CompileError::Internal(format!(
                "integer constant {n} scheduled as an instruction"
            ))),
        }
    }

    /// Get the operand into a register: constants are loaded into `dest`
    /// at their use site, computed values are already pinned.
    fn materialize(
        &mut self,
        operand: ValueId,
        dest: &'static str,
    ) -> Result<&'static str, CompileError> {
        match *self.raw.value(operand) {
            RawValue::Integer(n) => {
                self.emit(format!("  li {dest}, {n}"));
                Ok(dest)
            }
            _ => self.reg_of(operand),
        }
    }

    fn reg_of(&self, id: ValueId) -> Result<&'static str, CompileError> {
        self.regs.get(&id).copied().ok_or_else(|| {
            CompileError::Internal(format!(
                "value {:?} used before a register was assigned to it",
                self.raw.value(id)
            ))
        })
    }

    fn alloc_reg(&mut self, id: ValueId) -> Result<&'static str, CompileError> {
        let Some(&reg) = TEMP_REGS.get(self.next_reg) else {
            return Err(CompileError::Internal(format!(
                "expression needs more than {} scratch registers",
                TEMP_REGS.len()
            )));
        };
        self.next_reg += 1;
        self.regs.insert(id, reg);
        Ok(reg)
    }
}
