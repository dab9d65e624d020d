//! RISC-V backend — lowers the raw program to RV32 assembly.
//!
//! Module layout:
//! - `riscv` — the code-generation visitor (raw program → assembly text).

mod riscv;

pub use riscv::Codegen;

use crate::ir::raw::RawProgram;
use crate::CompileError;

/// Compile a raw program to RISC-V assembly text.
pub fn compile_raw_to_riscv(raw: &RawProgram) -> Result<String, CompileError> {
    let mut cg = Codegen::new(raw);
    cg.emit_program()?;
    Ok(cg.finish())
}
