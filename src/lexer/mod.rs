//! Lexical analysis for the interpreter.
//!
//! Converts one fragment of shell input into a stream of tokens. It handles:
//!
//! - Tokenization of source text using an ordered table of regex patterns
//! - Keywords, identifiers, integer, character and string literals
//! - Byte-offset spans for error reporting
//! - Comments and whitespace

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
