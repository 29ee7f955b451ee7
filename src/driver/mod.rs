//! Incremental driver.
//!
//! A [`session::Session`] owns the persistent program and symbol table
//! across shell turns and runs each new fragment through name analysis,
//! type checking and evaluation. Console input and output go through the
//! [`console::Console`] trait.

pub mod console;
pub mod session;

#[cfg(test)]
mod tests;
