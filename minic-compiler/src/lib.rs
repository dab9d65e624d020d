//! minic compiler library.
//!
//! The pipeline is staged, and each stage is observable from the CLI:
//!
//! - `frontend` — logos lexer and recursive-descent parser producing the AST.
//! - `ast`      — the syntax-tree model and its debug tree dump.
//! - `ir`       — textual SSA IR: emission from the AST, re-parsing of the
//!   text into a value-level program, and conversion into the raw
//!   (arena-indexed) form the backend traverses.
//! - `backend`  — RISC-V code generation over the raw program.
//!
//! Data flows strictly forward: AST → IR text → raw IR → assembly. The IR
//! text is the only artifact crossing the frontend/backend boundary, so it
//! doubles as a stable debugging format.

pub mod ast;
pub mod backend;
pub mod frontend;
pub mod ir;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexical error: {0}")]
    Lexical(#[from] frontend::lexer::LexicalError),

    #[error("Parse error at position {location}: {message}")]
    Parse { location: usize, message: String },

    #[error("IR parse error at line {line}: {message}")]
    IrParse { line: usize, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Parse a source string into its syntax tree.
pub fn parse_to_ast(source: &str) -> Result<ast::CompUnit, CompileError> {
    let tokens = frontend::lexer::lex(source)?;
    frontend::parser::parse(tokens)
}

/// Compile to the brace-style debug dump of the syntax tree.
pub fn compile_to_ast_dump(source: &str) -> Result<String, CompileError> {
    let unit = parse_to_ast(source)?;
    let mut dump = unit.to_string();
    dump.push('\n');
    Ok(dump)
}

/// Compile to the textual SSA IR.
pub fn compile_to_ir(source: &str) -> Result<String, CompileError> {
    let unit = parse_to_ast(source)?;
    Ok(ir::emit::emit_program(&unit))
}

/// Compile all the way to RISC-V assembly.
///
/// The textual IR is emitted and immediately re-parsed into the raw
/// program the backend walks; a failure in that round trip means the
/// emitter and the IR parser disagree and is reported as an internal
/// pipeline error, not a user error.
pub fn compile_to_riscv(source: &str) -> Result<String, CompileError> {
    let unit = parse_to_ast(source)?;
    let text = ir::emit::emit_program(&unit);
    let program = ir::text::parse_program(&text)?;
    let raw = ir::raw::RawProgramBuilder::new().build(&program)?;
    backend::compile_raw_to_riscv(&raw)
}
