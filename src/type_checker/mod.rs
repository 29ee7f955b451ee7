//! Type checking and evaluation.
//!
//! The checker assigns a type to every expression of a name-resolved
//! fragment and collects diagnostics without stopping at the first one:
//!
//! - Operators, assignments and calls are checked against their operands
//! - Conditions must be `bool`, returns must match the enclosing function
//! - A subexpression that already failed has type `Error` and is not
//!   reported again
//!
//! The evaluator runs statements that checked cleanly. It reads and writes
//! the values stored on the symbols the identifiers are bound to.

pub mod eval;
pub mod type_checker;
