//! Algorithm description parser
//!
//! This module transforms program text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! ```text
//! array arr = [5, 3, 8, 4, 2];
//! bubble_sort(arr);
//!
//! stack.push(10);
//! for (i = 0; i < 3; i++) { queue.enqueue(i); }
//! ```
//!
//! Loop headers and conditions are parsed but never evaluated; they are kept
//! as text so the semantic pass can walk every statement once.
//!
//! Hand-written recursive descent parser. No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parser;

use ast::Program;
use parser::{ParseError, Parser};

/// Lex and parse `source` in one call.
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    Parser::new(source)?.parse_program()
}
