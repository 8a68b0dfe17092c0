//! Filter matching and tree traversal over [`Node`](crate::ast::Node)s.

pub mod filter;
pub mod find;
pub mod search;

pub use filter::{Filter, FilterError, FilterSet};
pub use find::{FindQuery, NodeMatch};
pub use search::SearchOptions;
