/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - arena: Node storage, handles, and structural comparison
/// - node: The node sum type and operator kinds
pub mod arena;
pub mod node;
