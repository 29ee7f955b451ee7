//! Scoped symbol table and the runtime values held by symbols.

pub mod symbol_table;
pub mod value;
