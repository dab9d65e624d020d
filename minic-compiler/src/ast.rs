//! Syntax-tree model for the accepted source shape.
//!
//! The node set is closed: one compilation unit holding one function whose
//! body is a single `return`. The return value is either a bare integer
//! literal or a unary-operator expression tree. Every node is a sum type,
//! so "which alternative is populated" is enforced by construction rather
//! than checked at render time.
//!
//! Nodes carry two capabilities: the IR emitter consumes them read-only,
//! and `Display` renders the brace-style debug tree used by the `--ast`
//! output mode. The dump is a pure function of the tree.

use std::fmt;

/// A whole program: exactly one function definition.
#[derive(Debug, Clone)]
pub struct CompUnit {
    pub func_def: FuncDef,
}

/// A function definition: return type, identifier, one-statement body.
#[derive(Debug, Clone)]
pub struct FuncDef {
    pub func_type: FuncType,
    pub ident: String,
    pub block: Block,
}

/// Declared function return type. Only `int` (32-bit) exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuncType {
    Int,
}

impl FuncType {
    /// Source-level keyword spelling.
    pub fn keyword(&self) -> &'static str {
        match self {
            FuncType::Int => "int",
        }
    }

    /// IR-level type spelling.
    pub fn ir_type(&self) -> &'static str {
        match self {
            FuncType::Int => "i32",
        }
    }
}

/// A function body: exactly one statement.
#[derive(Debug, Clone)]
pub struct Block {
    pub stmt: Stmt,
}

/// A statement. The only statement form is `return <value>;`.
#[derive(Debug, Clone)]
pub enum Stmt {
    Return(ReturnValue),
}

/// The value of a return statement: a bare literal or an expression tree.
#[derive(Debug, Clone)]
pub enum ReturnValue {
    Number(i32),
    Exp(Exp),
}

/// An expression. Currently an alias-like wrapper around the unary level;
/// binary operator levels would slot in between here and `UnaryExp`.
#[derive(Debug, Clone)]
pub struct Exp {
    pub unary: UnaryExp,
}

/// Unary-operator level of the expression grammar.
#[derive(Debug, Clone)]
pub enum UnaryExp {
    Primary(PrimaryExp),
    Unary { op: UnaryOp, operand: Box<UnaryExp> },
}

/// Primary level: a literal or a parenthesized sub-expression.
#[derive(Debug, Clone)]
pub enum PrimaryExp {
    Number(i32),
    Paren(Box<Exp>),
}

/// The closed set of unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
}

impl UnaryOp {
    /// Source-level symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
        }
    }
}

// ── Debug tree dump ──────────────────────────────────────────────────────

impl fmt::Display for CompUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompUnit {{ {} }}", self.func_def)
    }
}

impl fmt::Display for FuncDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FuncDef {{ {}, {}, {} }}",
            self.func_type, self.ident, self.block
        )
    }
}

impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FuncType {{ {} }}", self.keyword())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block {{ {} }}", self.stmt)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Return(value) => write!(f, "Return {{ {} }}", value),
        }
    }
}

impl fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnValue::Number(n) => write!(f, "Number {{ {} }}", n),
            ReturnValue::Exp(e) => write!(f, "{}", e),
        }
    }
}

impl fmt::Display for Exp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exp {{ {} }}", self.unary)
    }
}

impl fmt::Display for UnaryExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryExp::Primary(p) => write!(f, "{}", p),
            UnaryExp::Unary { op, operand } => {
                write!(f, "Unary {{ {}, {} }}", op.symbol(), operand)
            }
        }
    }
}

impl fmt::Display for PrimaryExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimaryExp::Number(n) => write!(f, "Number {{ {} }}", n),
            PrimaryExp::Paren(e) => write!(f, "Paren {{ {} }}", e),
        }
    }
}
