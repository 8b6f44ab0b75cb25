pub mod ast;
pub mod node;

pub use ast::*;
pub use node::{Comment, Node, NodeAttributes, Span};
