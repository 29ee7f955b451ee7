/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, the closed statement and expression sets and their kind tags
/// - expressions: Expression and l-value nodes
/// - statements: Declaration and statement nodes
/// - types: Type descriptors and annotations
/// - unparse: Rendering nodes back to source text
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
pub mod unparse;

#[cfg(test)]
mod tests;
