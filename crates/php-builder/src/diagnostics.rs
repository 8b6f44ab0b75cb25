use php_node::{Node, Stmt};
use thiserror::Error;

/// A statement whose category is not permitted in the declaration being
/// built. The only error this crate produces; carries the rejected
/// statement's type tag for diagnostics, and the message format is relied on
/// by downstream tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unexpected node of type \"{type_tag}\"")]
pub struct StructuralError {
    pub type_tag: &'static str,
}

impl StructuralError {
    pub fn unexpected(stmt: &Stmt) -> Self {
        Self {
            type_tag: stmt.node_type(),
        }
    }
}
