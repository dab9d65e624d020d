//! The raw program: the slice-based, kind-tagged form the backend walks.
//!
//! Every value lives in one arena owned by the `RawProgram` itself and is
//! referenced by `ValueId` index, never by pointer. The builder is consumed
//! by `build`, so no traversal can outlive the storage backing it — the
//! finished program is self-contained and immutable.

use std::collections::HashMap;

use crate::ir::{Inst, IrUnaryOp, Operand, Program};
use crate::CompileError;

/// Index of a value in the program's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueId(u32);

/// A structured program: global values plus functions, backed by one arena.
#[derive(Debug)]
pub struct RawProgram {
    values: Vec<RawValue>,
    pub globals: Vec<ValueId>,
    pub funcs: Vec<RawFunction>,
}

#[derive(Debug)]
pub struct RawFunction {
    pub name: String,
    pub bbs: Vec<RawBasicBlock>,
}

#[derive(Debug)]
pub struct RawBasicBlock {
    pub name: String,
    pub insts: Vec<ValueId>,
}

/// One value: the kind tag selects the payload. The closed enum makes
/// "builder produced a kind the visitor does not handle" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue {
    /// An integer constant.
    Integer(i32),
    /// A unary operation on a previously defined value.
    Unary { op: IrUnaryOp, operand: ValueId },
    /// Return, with an optional return value.
    Return(Option<ValueId>),
}

impl RawProgram {
    /// Look up a value by id. Ids are only ever minted by the builder for
    /// this arena, so an out-of-range id is an internal contract violation.
    pub fn value(&self, id: ValueId) -> &RawValue {
        &self.values[id.0 as usize]
    }

    /// Total number of instructions across all blocks of all functions.
    pub fn inst_count(&self) -> usize {
        self.funcs
            .iter()
            .flat_map(|f| &f.bbs)
            .map(|bb| bb.insts.len())
            .sum()
    }
}

/// Builds a `RawProgram` from the value-level IR, interning constants and
/// resolving `%N` temp references to arena ids.
pub struct RawProgramBuilder {
    values: Vec<RawValue>,
}

impl RawProgramBuilder {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    fn push(&mut self, value: RawValue) -> ValueId {
        let id = ValueId(self.values.len() as u32);
        self.values.push(value);
        id
    }

    /// Convert a program. Temp references must point at an already defined
    /// instruction of the same function; anything else is an internal
    /// error, since the IR parser cannot check definition order itself.
    pub fn build(mut self, program: &Program) -> Result<RawProgram, CompileError> {
        let mut funcs = Vec::with_capacity(program.funcs.len());
        for func in &program.funcs {
            // %N -> arena id of its defining instruction, per function.
            let mut temps: HashMap<u32, ValueId> = HashMap::new();
            let mut bbs = Vec::with_capacity(func.bbs.len());
            for bb in &func.bbs {
                let mut insts = Vec::with_capacity(bb.insts.len());
                for inst in &bb.insts {
                    let id = match inst {
                        Inst::Unary { dest, op, operand } => {
                            let operand = self.resolve(&temps, *operand)?;
                            let id = self.push(RawValue::Unary { op: *op, operand });
                            temps.insert(*dest, id);
                            id
                        }
                        Inst::Return(operand) => {
                            let operand = self.resolve(&temps, *operand)?;
                            self.push(RawValue::Return(Some(operand)))
                        }
                    };
                    insts.push(id);
                }
                bbs.push(RawBasicBlock {
                    name: bb.name.clone(),
                    insts,
                });
            }
            funcs.push(RawFunction {
                name: func.name.clone(),
                bbs,
            });
        }

        Ok(RawProgram {
            values: self.values,
            globals: Vec::new(),
            funcs,
        })
    }

    fn resolve(
        &mut self,
        temps: &HashMap<u32, ValueId>,
        operand: Operand,
    ) -> Result<ValueId, CompileError> {
        match operand {
            Operand::Const(n) => Ok(self.push(RawValue::Integer(n))),
            Operand::Temp(t) => temps.get(&t).copied().ok_or_else(|| {
                CompileError::Internal(format!("IR temp %{t} referenced before definition"))
            }),
        }
    }
}

impl Default for RawProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}
