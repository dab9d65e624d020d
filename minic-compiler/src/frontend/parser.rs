//! Recursive-descent parser.
//!
//! Grammar (one production per function below):
//!
//! ```text
//! CompUnit   ::= FuncDef
//! FuncDef    ::= "int" IDENT "(" ")" Block
//! Block      ::= "{" Stmt "}"
//! Stmt       ::= "return" Exp ";"
//! Exp        ::= UnaryExp
//! UnaryExp   ::= PrimaryExp | UnaryOp UnaryExp
//! PrimaryExp ::= "(" Exp ")" | INT_CONST
//! UnaryOp    ::= "+" | "-" | "!"
//! ```

use crate::ast::{
    Block, CompUnit, Exp, FuncDef, FuncType, PrimaryExp, ReturnValue, Stmt, UnaryExp,
    UnaryOp,
};
use crate::frontend::lexer::{SpannedToken, Token};
use crate::CompileError;

/// Parse a spanned token stream into a compilation unit.
pub fn parse(tokens: Vec<SpannedToken>) -> Result<CompUnit, CompileError> {
    let mut parser = Parser { tokens, pos: 0 };
    let unit = parser.parse_comp_unit()?;
    parser.expect_end()?;
    Ok(unit)
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t, _)| t)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(_, t, _)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Byte offset of the current token, or of end-of-input.
    fn location(&self) -> usize {
        match self.tokens.get(self.pos) {
            Some((start, _, _)) => *start,
            None => self.tokens.last().map(|(_, _, end)| *end).unwrap_or(0),
        }
    }

    fn error(&self, message: impl Into<String>) -> CompileError {
        CompileError::Parse {
            location: self.location(),
            message: message.into(),
        }
    }

    fn found(&self) -> String {
        match self.peek() {
            Some(token) => format!("found {}", token.describe()),
            None => "found end of input".to_string(),
        }
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<(), CompileError> {
        if self.peek() == Some(&expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!(
                "expected {} {}, {}",
                expected.describe(),
                what,
                self.found()
            )))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, CompileError> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.error(format!("expected an identifier {what}, {}", self.found()))),
        }
    }

    fn parse_comp_unit(&mut self) -> Result<CompUnit, CompileError> {
        let func_def = self.parse_func_def()?;
        Ok(CompUnit { func_def })
    }

    fn parse_func_def(&mut self) -> Result<FuncDef, CompileError> {
        let func_type = self.parse_func_type()?;
        let ident = self.expect_ident("as the function name")?;
        self.expect(Token::LParen, "after the function name")?;
        self.expect(Token::RParen, "to close the parameter list")?;
        let block = self.parse_block()?;
        Ok(FuncDef {
            func_type,
            ident,
            block,
        })
    }

    fn parse_func_type(&mut self) -> Result<FuncType, CompileError> {
        match self.peek() {
            Some(Token::Int) => {
                self.pos += 1;
                Ok(FuncType::Int)
            }
            _ => Err(self.error(format!("expected a return type, {}", self.found()))),
        }
    }

    fn parse_block(&mut self) -> Result<Block, CompileError> {
        self.expect(Token::LBrace, "to open the function body")?;
        let stmt = self.parse_stmt()?;
        self.expect(Token::RBrace, "to close the function body")?;
        Ok(Block { stmt })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, CompileError> {
        self.expect(Token::Return, "to begin the statement")?;
        let exp = self.parse_exp()?;
        self.expect(Token::Semicolon, "after the return value")?;

        // A bare literal stays a literal; anything richer is kept as the
        // expression tree.
        let value = match exp {
            Exp {
                unary: UnaryExp::Primary(PrimaryExp::Number(n)),
            } => ReturnValue::Number(n),
            other => ReturnValue::Exp(other),
        };
        Ok(Stmt::Return(value))
    }

    fn parse_exp(&mut self) -> Result<Exp, CompileError> {
        let unary = self.parse_unary_exp()?;
        Ok(Exp { unary })
    }

    fn parse_unary_exp(&mut self) -> Result<UnaryExp, CompileError> {
        let op = match self.peek() {
            Some(Token::Plus) => Some(UnaryOp::Plus),
            Some(Token::Minus) => Some(UnaryOp::Minus),
            Some(Token::Bang) => Some(UnaryOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            self.pos += 1;
            let operand = Box::new(self.parse_unary_exp()?);
            return Ok(UnaryExp::Unary { op, operand });
        }
        Ok(UnaryExp::Primary(self.parse_primary_exp()?))
    }

    fn parse_primary_exp(&mut self) -> Result<PrimaryExp, CompileError> {
        match self.peek() {
            Some(Token::LParen) => {
                self.pos += 1;
                let exp = self.parse_exp()?;
                self.expect(Token::RParen, "to close the expression")?;
                Ok(PrimaryExp::Paren(Box::new(exp)))
            }
            Some(Token::Number(n)) => {
                let n = *n;
                self.pos += 1;
                Ok(PrimaryExp::Number(n))
            }
            _ => Err(self.error(format!("expected an expression, {}", self.found()))),
        }
    }

    fn expect_end(&mut self) -> Result<(), CompileError> {
        match self.bump() {
            None => Ok(()),
            Some(token) => Err(CompileError::Parse {
                location: self.tokens[self.pos - 1].0,
                message: format!(
                    "expected end of input after the function, found {}",
                    token.describe()
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::lex;

    fn parse_source(source: &str) -> Result<CompUnit, CompileError> {
        parse(lex(source).expect("test source should lex"))
    }

    #[test]
    fn literal_return_parses_to_number() {
        let unit = parse_source("int main() { return 0; }").expect("should parse");
        assert_eq!(unit.func_def.ident, "main");
        match &unit.func_def.block.stmt {
            Stmt::Return(ReturnValue::Number(n)) => assert_eq!(*n, 0),
            other => panic!("expected literal return, got {other:?}"),
        }
    }

    #[test]
    fn unary_return_parses_to_expression() {
        let unit = parse_source("int main() { return -5; }").expect("should parse");
        match &unit.func_def.block.stmt {
            Stmt::Return(ReturnValue::Exp(exp)) => match &exp.unary {
                UnaryExp::Unary { op, .. } => assert_eq!(*op, UnaryOp::Minus),
                other => panic!("expected unary expression, got {other:?}"),
            },
            other => panic!("expected expression return, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_literal_stays_an_expression() {
        let unit = parse_source("int main() { return (0); }").expect("should parse");
        assert!(matches!(
            unit.func_def.block.stmt,
            Stmt::Return(ReturnValue::Exp(_))
        ));
    }

    #[test]
    fn missing_semicolon_is_reported_at_the_brace() {
        let err = parse_source("int main() { return 0 }").expect_err("should fail");
        match err {
            CompileError::Parse { message, .. } => {
                assert!(message.contains("';'"), "unhelpful message: {message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let err = parse_source("int main() { return 0; } int").expect_err("should fail");
        assert!(matches!(err, CompileError::Parse { .. }));
    }
}
