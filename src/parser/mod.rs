//! Parser module for building the Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into the closed statement and expression trees of `crate::ast`. It uses a
//! Pratt parser for expressions with proper operator precedence and handles:
//!
//! - Declarations (variables, arrays, C-style and `fn` functions)
//! - Statements (assignment, `++`/`--`, console I/O, control flow, calls)
//! - Expressions (binary and unary operators, calls, indexing, `&`/`^`)
//! - Type annotations
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
