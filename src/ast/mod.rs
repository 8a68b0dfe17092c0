//! Arena-backed node model for solc JSON ASTs.

mod builder;
mod deps;
pub mod errors;
pub mod kind;
mod loader;
pub mod node;
pub mod value;

pub use errors::AstError;
pub use kind::{BaseNodeType, NodeKind};
pub use node::{Ancestors, Ast, Descendants, Node, NodeId, NodeIter};
pub use value::{Field, Resolved};
