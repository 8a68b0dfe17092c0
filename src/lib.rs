//! Solidity AST: typed access to solc JSON ASTs
//!
//! Wraps the JSON AST emitted by the Solidity compiler into an arena of
//! nodes with parent links, depth and source-offset bookkeeping, and
//! answers structural queries over it.
//!
//! # Architecture
//!
//! Every node of every source file lives in one [`Ast`] arena and is
//! addressed by [`NodeId`]. A [`Node`] is a cheap `Copy` handle into that
//! arena; all queries hang off it:
//!
//! - [`Node::children`] / [`Node::parents`] for bounded descendant and
//!   ancestor search driven by [`SearchOptions`]
//! - [`Node::find_node`] for combined node/parent/child [`FindQuery`]s
//! - [`Node::extract_code`] for the source lines a node covers
//!
//! Filters are attribute-path equalities (`expression.memberName = "mul"`)
//! combined with AND inside a [`Filter`] and OR across a [`FilterSet`].
//!
//! # Example
//!
//! ```no_run
//! use solidity_ast::{Ast, Filter, SearchOptions};
//!
//! let output = std::fs::read_to_string("build/output.json")?;
//! let ast = Ast::from_standard_output_str(&output)?;
//!
//! for root in ast.roots() {
//!     let options = SearchOptions::new().with_filters(Filter::node_type("FunctionCall"));
//!     for call in root.children(&options) {
//!         println!("{call:?}");
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ast;
pub mod cache;
pub mod config;
pub mod extract;
pub mod lines;
pub mod offset;
pub mod query;

// Re-exports
pub use ast::{Ast, AstError, BaseNodeType, Field, Node, NodeId, NodeKind, Resolved};
pub use config::{load_from_path, load_from_str, run_queries, ConfigError, QueryConfig};
pub use extract::ExtractError;
pub use lines::LineIndex;
pub use offset::{Offset, OffsetError};
pub use query::{Filter, FilterSet, FindQuery, NodeMatch, SearchOptions};
