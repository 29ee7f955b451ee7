//! Error types and error handling for the interpreter.
//!
//! This module defines the single positioned error type shared by every
//! stage of the pipeline. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, name analysis, type checking and evaluation
//! - A classification of each variant into a pipeline stage
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
