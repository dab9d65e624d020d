//! Textual IR → value-level IR.
//!
//! This is the inverse of `Program::to_text`. The emitter and this parser
//! sit on the same trusted pipeline, so any malformed line is a fatal
//! internal error for the whole run; there is no recovery or resynchronization.

use crate::ir::{BasicBlock, Function, Inst, IrType, IrUnaryOp, Operand, Program};
use crate::CompileError;

/// Parse a textual IR string into a value-level program.
pub fn parse_program(text: &str) -> Result<Program, CompileError> {
    let mut funcs = Vec::new();
    let mut current: Option<Function> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let lineno = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("fun @") {
            if current.is_some() {
                return Err(err(lineno, "function definition inside a function"));
            }
            current = Some(parse_func_header(rest, lineno)?);
        } else if line == "}" {
            let func = current
                .take()
                .ok_or_else(|| err(lineno, "'}' outside a function"))?;
            if func.bbs.is_empty() {
                return Err(err(lineno, "function has no basic blocks"));
            }
            funcs.push(func);
        } else if let Some(label) = line.strip_prefix('%').and_then(|l| l.strip_suffix(':')) {
            if label.is_empty() {
                return Err(err(lineno, "empty basic-block label"));
            }
            let func = current
                .as_mut()
                .ok_or_else(|| err(lineno, "basic-block label outside a function"))?;
            func.bbs.push(BasicBlock {
                name: label.to_string(),
                insts: Vec::new(),
            });
        } else {
            let inst = parse_inst(line, lineno)?;
            let bb = current
                .as_mut()
                .and_then(|f| f.bbs.last_mut())
                .ok_or_else(|| err(lineno, "instruction outside a basic block"))?;
            bb.insts.push(inst);
        }
    }

    if current.is_some() {
        return Err(err(
            text.lines().count(),
            "unterminated function at end of IR text",
        ));
    }
    Ok(Program { funcs })
}

fn err(line: usize, message: impl Into<String>) -> CompileError {
    CompileError::IrParse {
        line,
        message: message.into(),
    }
}

/// Parse `name(): type {` (the part after `fun @`).
fn parse_func_header(rest: &str, lineno: usize) -> Result<Function, CompileError> {
    let body = rest
        .strip_suffix('{')
        .ok_or_else(|| err(lineno, "function header must end with '{'"))?
        .trim_end();
    let (name, ty) = body
        .split_once("():")
        .ok_or_else(|| err(lineno, "malformed function header"))?;
    if name.is_empty() {
        return Err(err(lineno, "empty function name"));
    }
    let ret_type = match ty.trim() {
        "i32" => IrType::I32,
        other => return Err(err(lineno, format!("unknown return type '{other}'"))),
    };
    Ok(Function {
        name: name.to_string(),
        ret_type,
        bbs: Vec::new(),
    })
}

fn parse_inst(line: &str, lineno: usize) -> Result<Inst, CompileError> {
    if let Some(rest) = line.strip_prefix("ret ") {
        return Ok(Inst::Return(parse_operand(rest.trim(), lineno)?));
    }

    if let Some(rest) = line.strip_prefix('%') {
        let (dest, rhs) = rest
            .split_once(" = ")
            .ok_or_else(|| err(lineno, "expected '=' in instruction"))?;
        let dest: u32 = dest
            .parse()
            .map_err(|_| err(lineno, format!("bad temp name '%{dest}'")))?;
        let (mnemonic, operand) = rhs
            .split_once(' ')
            .ok_or_else(|| err(lineno, "instruction is missing its operand"))?;
        let op = match mnemonic {
            "neg" => IrUnaryOp::Neg,
            "not" => IrUnaryOp::Not,
            other => return Err(err(lineno, format!("unknown instruction '{other}'"))),
        };
        let operand = parse_operand(operand.trim(), lineno)?;
        return Ok(Inst::Unary { dest, op, operand });
    }

    Err(err(lineno, format!("unrecognized IR line '{line}'")))
}

fn parse_operand(text: &str, lineno: usize) -> Result<Operand, CompileError> {
    if let Some(temp) = text.strip_prefix('%') {
        let t: u32 = temp
            .parse()
            .map_err(|_| err(lineno, format!("bad temp reference '%{temp}'")))?;
        return Ok(Operand::Temp(t));
    }
    let n: i32 = text
        .parse()
        .map_err(|_| err(lineno, format!("bad integer operand '{text}'")))?;
    Ok(Operand::Const(n))
}
