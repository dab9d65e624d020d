//! Frontend: lexical analysis and parsing.
//!
//! - `lexer`  — logos-derived token stream with spans.
//! - `parser` — recursive descent over the spanned tokens, producing the
//!   syntax tree in `crate::ast`.

pub mod lexer;
pub mod parser;
