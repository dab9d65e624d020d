// The value-level IR: a program of functions, each a list of basic blocks
// holding SSA instructions. `to_text` renders the canonical textual form;
// `text::parse_program` is its inverse.

use std::fmt;

#[derive(Debug, Clone)]
pub struct Program {
    pub funcs: Vec<Function>,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub ret_type: IrType,
    pub bbs: Vec<BasicBlock>,
}

/// IR-level value types. Only 32-bit integers exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrType {
    I32,
}

#[derive(Debug, Clone)]
pub struct BasicBlock {
    pub name: String,
    pub insts: Vec<Inst>,
}

/// One SSA instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    /// `%dest = op operand`
    Unary {
        dest: u32,
        op: IrUnaryOp,
        operand: Operand,
    },
    /// `ret operand`
    Return(Operand),
}

/// An instruction operand: an integer constant or a previously defined temp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Const(i32),
    Temp(u32),
}

/// Unary IR operations. Unary plus never reaches the IR (the emitter
/// forwards its operand unchanged).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrUnaryOp {
    Neg,
    Not,
}

impl IrUnaryOp {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            IrUnaryOp::Neg => "neg",
            IrUnaryOp::Not => "not",
        }
    }
}

impl Program {
    /// Render the canonical textual IR, one entry per line.
    pub fn to_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for func in &self.funcs {
            out.push(format!("fun @{}(): {} {{", func.name, func.ret_type));
            for bb in &func.bbs {
                out.push(format!("%{}:", bb.name));
                for inst in &bb.insts {
                    out.push(format!("  {inst}"));
                }
            }
            out.push("}".to_string());
        }
        out
    }

    /// Render the canonical textual IR as one string with a trailing newline.
    pub fn to_text(&self) -> String {
        let mut text = self.to_lines().join("\n");
        text.push('\n');
        text
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::I32 => write!(f, "i32"),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Const(n) => write!(f, "{n}"),
            Operand::Temp(t) => write!(f, "%{t}"),
        }
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::Unary { dest, op, operand } => {
                write!(f, "%{dest} = {} {operand}", op.mnemonic())
            }
            Inst::Return(operand) => write!(f, "ret {operand}"),
        }
    }
}
