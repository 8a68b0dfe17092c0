pub mod loader;
pub mod runner;
pub mod schema;

pub use loader::{load_from_path, load_from_str, ConfigError};
pub use runner::{run_queries, Excerpt, QueryHit, QueryReport};
pub use schema::{
    Metadata, OutputOptions, QueryConfig, QueryDefinition, ValidationError, ValidationIssue,
};
