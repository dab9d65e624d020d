use logos::Logos;
use std::fmt;
use thiserror::Error;

#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(skip r"[ \t\r\n]+")] // Whitespace
#[logos(skip(r"//[^\n]*", allow_greedy = true))] // Line comments
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")] // Block comments, trailing stars included
pub enum Token {
    // --- Keywords ---
    #[token("int")]
    Int,
    #[token("return")]
    Return,

    // --- Identifiers and Numbers ---
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"[0-9]+", |lex| lex.slice().parse().ok())]
    Number(i32),

    // --- Operators ---
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("!")]
    Bang,

    // --- Punctuation ---
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
}

impl Token {
    /// Human-readable spelling used in parse-error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Int => "'int'".to_string(),
            Token::Return => "'return'".to_string(),
            Token::Ident(name) => format!("identifier '{name}'"),
            Token::Number(n) => format!("number '{n}'"),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Bang => "'!'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::LBrace => "'{'".to_string(),
            Token::RBrace => "'}'".to_string(),
            Token::Semicolon => "';'".to_string(),
        }
    }
}

/// A lexical error with enough position detail to point at the source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    #[error("unexpected character '{unexpected_char}' at line {line}, column {column}: {context}")]
    UnexpectedCharacter {
        location: usize,
        line: usize,
        column: usize,
        unexpected_char: char,
        context: String,
    },

    /// Digits lexed fine but the value does not fit in an `i32`. Since the
    /// minus sign is a unary operator rather than part of the literal,
    /// `i32::MIN` itself is not expressible as a source literal.
    #[error("integer literal '{literal}' out of range at line {line}, column {column}: {context}")]
    IntegerOutOfRange {
        location: usize,
        line: usize,
        column: usize,
        literal: String,
        context: String,
    },
}

/// A token plus its byte span in the source.
pub type SpannedToken = (usize, Token, usize);

/// Convert a byte offset to 1-based line and column numbers.
fn position_to_line_col(source: &str, position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (idx, ch) in source.char_indices() {
        if idx >= position {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Extract the trimmed source line surrounding a position.
fn get_error_context(source: &str, position: usize) -> String {
    let position = position.min(source.len());
    let line_start = source[..position]
        .rfind('\n')
        .map(|pos| pos + 1)
        .unwrap_or(0);

    let line_end = source[position..]
        .find('\n')
        .map(|pos| position + pos)
        .unwrap_or(source.len());

    source[line_start..line_end].trim().to_string()
}

/// Create a detailed lexical error from a position and source.
fn create_lexical_error(source: &str, position: usize) -> LexicalError {
    let (line, column) = position_to_line_col(source, position);
    let unexpected_char = source[position..].chars().next().unwrap_or('\0');
    let context = get_error_context(source, position);

    LexicalError::UnexpectedCharacter {
        location: position,
        line,
        column,
        unexpected_char,
        context,
    }
}

/// Create an out-of-range error for a digit run that overflowed `i32`.
fn create_range_error(source: &str, span: std::ops::Range<usize>) -> LexicalError {
    let (line, column) = position_to_line_col(source, span.start);
    let context = get_error_context(source, span.start);

    LexicalError::IntegerOutOfRange {
        location: span.start,
        line,
        column,
        literal: source[span].to_string(),
        context,
    }
}

/// Lex a whole source string into spanned tokens.
pub fn lex(source: &str) -> Result<Vec<SpannedToken>, LexicalError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((span.start, token, span.end)),
            Err(_) => {
                // The number regex matched but the value overflowed `i32`;
                // report the range problem, not the leading digit.
                let slice = &source[span.clone()];
                if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(create_range_error(source, span));
                }
                return Err(create_lexical_error(source, span.start));
            }
        }
    }
    Ok(tokens)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
