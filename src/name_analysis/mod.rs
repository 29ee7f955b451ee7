//! Name analysis.
//!
//! Walks a fragment top-down, opens a scope for every function, branch and
//! loop body, inserts declarations and binds each identifier occurrence to
//! the symbol it refers to. Undeclared names and same-scope redeclarations
//! are reported here.

pub mod name_analysis;
